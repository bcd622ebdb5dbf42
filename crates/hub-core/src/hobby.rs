//! Static hobby catalog
//!
//! The catalog is fixed at compile time and read-only at runtime. Every
//! post, event and resource is tagged with one of these ids; content
//! operations reject unknown ids so no record ever points at a community
//! that does not exist.

/// A single catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hobby {
    /// Stable id used as the community/content tag
    pub id: &'static str,
    /// Display name
    pub name: &'static str,
    /// Short description shown on the community header
    pub desc: &'static str,
}

/// The full catalog
pub const HOBBIES: [Hobby; 6] = [
    Hobby {
        id: "music",
        name: "Music 🎵",
        desc: "Chord progressions, practice tips, songwriting.",
    },
    Hobby {
        id: "coding",
        name: "Coding 💻",
        desc: "Web dev, projects, debugging & learning paths.",
    },
    Hobby {
        id: "painting",
        name: "Painting 🎨",
        desc: "Art styles, brush techniques, color theory.",
    },
    Hobby {
        id: "photography",
        name: "Photography 📷",
        desc: "Camera settings, composition, editing.",
    },
    Hobby {
        id: "gaming",
        name: "Gaming 🎮",
        desc: "Strategy, esports, reviews & friendly matches.",
    },
    Hobby {
        id: "cooking",
        name: "Cooking 🍳",
        desc: "Recipes, plating, kitchen hacks.",
    },
];

/// Community shown when a principal has no hobby selection
pub const DEFAULT_COMMUNITY: &str = "coding";

/// Hobbies preselected for guest sessions
pub const DEFAULT_GUEST_HOBBIES: [&str; 2] = ["coding", "music"];

/// Look up a catalog entry by id
pub fn find(id: &str) -> Option<&'static Hobby> {
    HOBBIES.iter().find(|h| h.id == id)
}

/// Check whether an id exists in the catalog
pub fn is_known(id: &str) -> bool {
    find(id).is_some()
}
