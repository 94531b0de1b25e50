//! Posts index artifact.
//!
//! The index is the only contract between the builder and the query engine:
//! a pretty-printed JSON document written to `<output>/posts-index.json` and
//! fetched once by the engine.
//!
//! ```json
//! {
//!   "posts": [
//!     { "slug": "frontend/react/use-effect", "title": "useEffect", "date": "2024-03-01",
//!       "tags": ["react"], "excerpt": "...", "content": "...", "readingTime": 4,
//!       "filePath": "src/pages/frontend/react/use-effect.md" }
//!   ],
//!   "lastGenerated": "2024-03-02T09:00:00.000Z"
//! }
//! ```

mod types;

pub use types::{Post, PostsIndex, TagFrequency};
