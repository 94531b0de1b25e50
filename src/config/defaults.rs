//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

// ============================================================================
// Common Defaults
// ============================================================================

pub fn r#true() -> bool {
    true
}

pub fn r#false() -> bool {
    false
}

// ============================================================================
// [base] Section Defaults
// ============================================================================

pub mod base {
    pub fn url() -> Option<String> {
        None
    }
}

// ============================================================================
// [build] Section Defaults
// ============================================================================

pub mod build {
    use std::path::PathBuf;

    pub fn root() -> Option<PathBuf> {
        None
    }

    pub fn content() -> PathBuf {
        "src/pages".into()
    }

    pub fn output() -> PathBuf {
        "public".into()
    }

    pub fn index() -> PathBuf {
        "posts-index.json".into()
    }

    pub fn words_per_minute() -> usize {
        200
    }

    pub fn excerpt_length() -> usize {
        150
    }

    pub mod sitemap {
        use crate::config::StaticPage;
        use std::path::PathBuf;

        pub fn path() -> PathBuf {
            "sitemap.xml".into()
        }

        pub fn post_prefix() -> String {
            "post".into()
        }

        pub fn pages() -> Vec<StaticPage> {
            vec![
                StaticPage::new("/", "1.0", "weekly"),
                StaticPage::new("/about", "0.8", "monthly"),
            ]
        }
    }
}

// ============================================================================
// [serve] Section Defaults
// ============================================================================

pub mod serve {
    pub fn interface() -> String {
        "127.0.0.1".into()
    }

    pub fn port() -> u16 {
        5277
    }
}
