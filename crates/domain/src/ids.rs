use std::fmt;

use serde::{Deserialize, Serialize};

use crate::labels::{NodeLabel, NodeRef};

/// Typed integer ids.
///
/// Ids are issued by the store (relational primary keys during migration,
/// the id allocator afterwards), so there is no `new()` constructor.
macro_rules! define_id {
    ($name:ident, $label:expr) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            pub const LABEL: NodeLabel = $label;

            pub const fn from_i64(value: i64) -> Self {
                Self(value)
            }

            pub const fn as_i64(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl From<$name> for i64 {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl From<$name> for NodeRef {
            fn from(value: $name) -> Self {
                NodeRef::new($label, value.0)
            }
        }
    };
}

define_id!(UserId, NodeLabel::User);
define_id!(DeckId, NodeLabel::Deck);
define_id!(CardId, NodeLabel::Card);
define_id!(CommentId, NodeLabel::Comment);
define_id!(EnemyId, NodeLabel::Enemy);
define_id!(FightId, NodeLabel::Fight);
define_id!(GameActionId, NodeLabel::GameAction);
