//! Headless reference host
//!
//! A windowless stand-in for a game engine. Integrates gravity on dynamic
//! bodies, plays scripted motion, and reports begin-contacts between filtered
//! regions. Collision response is not simulated: bodies pass through each
//! other and only contacts are reported.

use std::collections::HashSet;

use glam::Vec2;

use super::collision::shapes_overlap;
use crate::Settings;
use crate::sim::{
    CollisionFilter, ContactBody, ContactEvent, Label, LabelKind, MotionScript, RegionId,
    RegionKind, RegionSpec, Scene, Shape,
};

#[derive(Debug, Clone)]
struct ActiveScript {
    script: MotionScript,
    origin: Vec2,
    elapsed: f32,
}

/// A region living in the headless scene
#[derive(Debug, Clone)]
pub struct Body {
    pub id: RegionId,
    pub kind: RegionKind,
    pub shape: Shape,
    pub position: Vec2,
    pub velocity: Vec2,
    pub dynamic: bool,
    pub mass: f32,
    pub z: f32,
    pub filter: Option<CollisionFilter>,
    script: Option<ActiveScript>,
}

#[derive(Debug, Clone)]
pub struct HeadlessScene {
    /// Sorted by id
    bodies: Vec<Body>,
    labels: Vec<Label>,
    gravity: Vec2,
    default_mass: f32,
    paused: bool,
    /// Report every begin-contact a second time from the other body's side
    echo_contacts: bool,
    /// Pairs currently overlapping, lower id first
    touching: HashSet<(RegionId, RegionId)>,
    next_id: u32,
    time: f32,
}

impl HeadlessScene {
    pub fn new(settings: &Settings) -> Self {
        Self {
            bodies: Vec::new(),
            labels: Vec::new(),
            gravity: settings.physics.gravity,
            default_mass: settings.player.mass,
            paused: false,
            echo_contacts: false,
            touching: HashSet::new(),
            next_id: 1,
            time: 0.0,
        }
    }

    /// Deliver each contact twice, once per body perspective
    pub fn with_echo_contacts(mut self, echo: bool) -> Self {
        self.echo_contacts = echo;
        self
    }

    pub fn region(&self, id: RegionId) -> Option<&Body> {
        self.bodies
            .binary_search_by_key(&id, |b| b.id)
            .ok()
            .map(|i| &self.bodies[i])
    }

    fn region_mut(&mut self, id: RegionId) -> Option<&mut Body> {
        match self.bodies.binary_search_by_key(&id, |b| b.id) {
            Ok(i) => Some(&mut self.bodies[i]),
            Err(_) => {
                log::debug!("No region {:?} in scene", id);
                None
            }
        }
    }

    pub fn regions(&self) -> impl Iterator<Item = &Body> {
        self.bodies.iter()
    }

    pub fn count_kind(&self, kind: RegionKind) -> usize {
        self.bodies.iter().filter(|b| b.kind == kind).count()
    }

    pub fn label(&self, kind: LabelKind) -> Option<&Label> {
        self.labels.iter().find(|l| l.kind == kind)
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Unpaused seconds simulated so far
    pub fn time(&self) -> f32 {
        self.time
    }

    fn integrate(&mut self, dt: f32) {
        let gravity = self.gravity;
        for body in self.bodies.iter_mut().filter(|b| b.dynamic) {
            body.velocity += gravity * dt;
            body.position += body.velocity * dt;
        }
    }

    /// Advance scripts and drop bodies whose move-then-remove finished
    fn run_scripts(&mut self, dt: f32) {
        for body in &mut self.bodies {
            let Some(active) = body.script.as_mut() else {
                continue;
            };
            active.elapsed += dt;
            match active.script {
                MotionScript::MoveThenRemove { delta, duration } => {
                    let t = if duration > 0.0 {
                        (active.elapsed / duration).min(1.0)
                    } else {
                        1.0
                    };
                    body.position = active.origin + delta * t;
                }
                MotionScript::LoopShift { delta, duration } => {
                    if duration > 0.0 {
                        let phase = active.elapsed.rem_euclid(duration) / duration;
                        body.position = active.origin + delta * phase;
                    }
                }
            }
        }

        let before = self.bodies.len();
        self.bodies.retain(|body| match &body.script {
            Some(ActiveScript {
                script: MotionScript::MoveThenRemove { duration, .. },
                elapsed,
                ..
            }) => elapsed < duration,
            _ => true,
        });
        if self.bodies.len() != before {
            let live: HashSet<RegionId> = self.bodies.iter().map(|b| b.id).collect();
            self.touching.retain(|(a, b)| live.contains(a) && live.contains(b));
        }
    }

    fn detect_contacts(&mut self) -> Vec<ContactEvent> {
        let mut contacts = Vec::new();

        for (i, a) in self.bodies.iter().enumerate() {
            let Some(fa) = a.filter else { continue };
            for b in &self.bodies[i + 1..] {
                let Some(fb) = b.filter else { continue };
                if !fa.reports_contact(&fb) {
                    continue;
                }

                let key = (a.id, b.id);
                if shapes_overlap(a.shape, a.position, b.shape, b.position) {
                    if self.touching.insert(key) {
                        let event = ContactEvent::new(
                            ContactBody {
                                region: a.id,
                                category: fa.category,
                            },
                            ContactBody {
                                region: b.id,
                                category: fb.category,
                            },
                        );
                        contacts.push(event);
                        if self.echo_contacts {
                            contacts.push(event.swapped());
                        }
                    }
                } else {
                    self.touching.remove(&key);
                }
            }
        }

        contacts
    }
}

impl Scene for HeadlessScene {
    fn add_region(&mut self, spec: RegionSpec) -> RegionId {
        let id = RegionId(self.next_id);
        self.next_id += 1;
        self.bodies.push(Body {
            id,
            kind: spec.kind,
            shape: spec.shape,
            position: spec.position,
            velocity: Vec2::ZERO,
            dynamic: spec.dynamic,
            mass: self.default_mass,
            z: spec.z,
            filter: None,
            script: None,
        });
        id
    }

    fn set_filter(&mut self, id: RegionId, filter: CollisionFilter) {
        if let Some(body) = self.region_mut(id) {
            body.filter = Some(filter);
        }
    }

    fn run_script(&mut self, id: RegionId, script: MotionScript) {
        if let Some(body) = self.region_mut(id) {
            body.script = Some(ActiveScript {
                script,
                origin: body.position,
                elapsed: 0.0,
            });
        }
    }

    fn set_dynamic(&mut self, id: RegionId, dynamic: bool) {
        if let Some(body) = self.region_mut(id) {
            body.dynamic = dynamic;
        }
    }

    fn set_velocity(&mut self, id: RegionId, velocity: Vec2) {
        if let Some(body) = self.region_mut(id) {
            body.velocity = velocity;
        }
    }

    fn apply_impulse(&mut self, id: RegionId, impulse: Vec2) {
        if let Some(body) = self.region_mut(id) {
            if body.mass > 0.0 {
                body.velocity += impulse / body.mass;
            }
        }
    }

    fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    fn set_label(&mut self, label: Label) {
        match self.labels.iter_mut().find(|l| l.kind == label.kind) {
            Some(existing) => *existing = label,
            None => self.labels.push(label),
        }
    }

    fn clear(&mut self) {
        self.bodies.clear();
        self.labels.clear();
        self.touching.clear();
    }

    fn position(&self, id: RegionId) -> Option<Vec2> {
        self.region(id).map(|b| b.position)
    }

    fn step(&mut self, dt: f32) -> Vec<ContactEvent> {
        if self.paused {
            return Vec::new();
        }
        self.time += dt;
        self.integrate(dt);
        self.run_scripts(dt);
        self.detect_contacts()
    }
}
