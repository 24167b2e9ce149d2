//! Collision categories and contact classification
//!
//! Every physical region carries a [`CollisionFilter`]. The host uses the
//! filters to decide which overlaps to report; the round controller uses
//! [`ContactKind::classify`] to decide what a reported contact means.

use serde::{Deserialize, Serialize};

use super::region::RegionId;

/// Category tag attached to a physical region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Player,
    /// Obstacles and the ground
    Obstacle,
    /// Invisible scoring sensor between an obstacle pair
    Gap,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Player, Category::Obstacle, Category::Gap];

    const fn bit(self) -> u8 {
        match self {
            Category::Player => 1 << 0,
            Category::Obstacle => 1 << 1,
            Category::Gap => 1 << 2,
        }
    }
}

/// Category pairs that may ever produce a contact
pub const ALLOWED_CONTACTS: [(Category, Category); 2] = [
    (Category::Player, Category::Obstacle),
    (Category::Player, Category::Gap),
];

/// True if the unordered pair appears in [`ALLOWED_CONTACTS`]
pub fn contact_allowed(a: Category, b: Category) -> bool {
    ALLOWED_CONTACTS
        .iter()
        .any(|&(x, y)| (x == a && y == b) || (x == b && y == a))
}

/// A set of categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CategorySet(u8);

impl CategorySet {
    pub const EMPTY: CategorySet = CategorySet(0);

    pub const fn only(category: Category) -> Self {
        CategorySet(category.bit())
    }

    pub const fn with(self, category: Category) -> Self {
        CategorySet(self.0 | category.bit())
    }

    pub fn contains(self, category: Category) -> bool {
        self.0 & category.bit() != 0
    }

    pub fn iter(self) -> impl Iterator<Item = Category> {
        Category::ALL.into_iter().filter(move |c| self.contains(*c))
    }
}

impl FromIterator<Category> for CategorySet {
    fn from_iter<I: IntoIterator<Item = Category>>(iter: I) -> Self {
        iter.into_iter().fold(CategorySet::EMPTY, CategorySet::with)
    }
}

/// Category triple attached to a region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollisionFilter {
    /// What this region is
    pub category: Category,
    /// Categories whose overlap with this region is reported as a contact
    pub contacts_with: CategorySet,
    /// Categories this region physically collides with
    pub collides_with: CategorySet,
}

impl CollisionFilter {
    /// Player: reports obstacle contacts, never physically bounces off anything
    pub const PLAYER: CollisionFilter = CollisionFilter {
        category: Category::Player,
        contacts_with: CategorySet::only(Category::Obstacle),
        collides_with: CategorySet::only(Category::Player),
    };

    /// Obstacles and ground: react only to the player
    pub const OBSTACLE: CollisionFilter = CollisionFilter {
        category: Category::Obstacle,
        contacts_with: CategorySet::only(Category::Player),
        collides_with: CategorySet::only(Category::Obstacle),
    };

    /// Scoring sensor: reacts only to the player
    pub const GAP: CollisionFilter = CollisionFilter {
        category: Category::Gap,
        contacts_with: CategorySet::only(Category::Player),
        collides_with: CategorySet::only(Category::Gap),
    };

    /// Whether an overlap between two filtered regions should be reported
    pub fn reports_contact(&self, other: &CollisionFilter) -> bool {
        contact_allowed(self.category, other.category)
            && (self.contacts_with.contains(other.category)
                || other.contacts_with.contains(self.category))
    }
}

/// One side of a contact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactBody {
    pub region: RegionId,
    pub category: Category,
}

/// A contact reported by the host when two regions start overlapping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactEvent {
    pub a: ContactBody,
    pub b: ContactBody,
}

impl ContactEvent {
    pub fn new(a: ContactBody, b: ContactBody) -> Self {
        Self { a, b }
    }

    /// The same contact seen from the other body
    pub fn swapped(self) -> Self {
        Self {
            a: self.b,
            b: self.a,
        }
    }

    /// The gap-side region, if either side is a gap
    pub fn gap_region(&self) -> Option<RegionId> {
        if self.a.category == Category::Gap {
            Some(self.a.region)
        } else if self.b.category == Category::Gap {
            Some(self.b.region)
        } else {
            None
        }
    }
}

/// What a contact means for the round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactKind {
    /// The player passed through the given gap
    Score { gap: RegionId },
    /// The player hit an obstacle or the ground
    Crash,
}

impl ContactKind {
    /// Classify a contact; pairs outside [`ALLOWED_CONTACTS`] yield `None`
    pub fn classify(event: &ContactEvent) -> Option<ContactKind> {
        if !contact_allowed(event.a.category, event.b.category) {
            return None;
        }
        match event.gap_region() {
            Some(gap) => Some(ContactKind::Score { gap }),
            None => Some(ContactKind::Crash),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(id: u32, category: Category) -> ContactBody {
        ContactBody {
            region: RegionId(id),
            category,
        }
    }

    #[test]
    fn allowed_table_is_symmetric_and_exhaustive() {
        for a in Category::ALL {
            for b in Category::ALL {
                let expected = matches!(
                    (a, b),
                    (Category::Player, Category::Obstacle)
                        | (Category::Obstacle, Category::Player)
                        | (Category::Player, Category::Gap)
                        | (Category::Gap, Category::Player)
                );
                assert_eq!(contact_allowed(a, b), expected, "{a:?} vs {b:?}");
            }
        }
    }

    #[test]
    fn stock_filters_report_only_player_pairs() {
        use CollisionFilter as F;
        assert!(F::PLAYER.reports_contact(&F::OBSTACLE));
        assert!(F::OBSTACLE.reports_contact(&F::PLAYER));
        assert!(F::PLAYER.reports_contact(&F::GAP));
        assert!(F::GAP.reports_contact(&F::PLAYER));
        assert!(!F::OBSTACLE.reports_contact(&F::OBSTACLE));
        assert!(!F::OBSTACLE.reports_contact(&F::GAP));
        assert!(!F::GAP.reports_contact(&F::GAP));
        assert!(!F::PLAYER.reports_contact(&F::PLAYER));
    }

    #[test]
    fn classify_gap_on_either_side() {
        let event = ContactEvent::new(body(1, Category::Player), body(7, Category::Gap));
        assert_eq!(
            ContactKind::classify(&event),
            Some(ContactKind::Score { gap: RegionId(7) })
        );
        assert_eq!(
            ContactKind::classify(&event.swapped()),
            Some(ContactKind::Score { gap: RegionId(7) })
        );
    }

    #[test]
    fn classify_obstacle_is_crash() {
        let event = ContactEvent::new(body(4, Category::Obstacle), body(1, Category::Player));
        assert_eq!(ContactKind::classify(&event), Some(ContactKind::Crash));
    }

    #[test]
    fn classify_rejects_unlisted_pairs() {
        let event = ContactEvent::new(body(4, Category::Obstacle), body(5, Category::Gap));
        assert_eq!(ContactKind::classify(&event), None);
    }

    #[test]
    fn category_set_collects() {
        let set: CategorySet = [Category::Gap, Category::Player].into_iter().collect();
        assert!(set.contains(Category::Gap));
        assert!(!set.contains(Category::Obstacle));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![Category::Player, Category::Gap]);
    }
}
