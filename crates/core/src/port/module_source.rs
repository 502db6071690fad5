// Module Declaration Source Port

use crate::error::Result;

/// Supplies the ordered module-access declarations (one per line of `modules.info`)
pub trait ModuleSource: Send + Sync {
    /// Load all declarations, in file order
    ///
    /// # Errors
    /// - LaunchError::ModuleDeclarations if the source is missing or unreadable
    fn load(&self) -> Result<Vec<String>>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use crate::error::LaunchError;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// In-memory declaration list
    pub struct InMemoryModuleSource {
        declarations: Option<Vec<String>>,
        load_count: AtomicUsize,
    }

    impl InMemoryModuleSource {
        pub fn new<I, S>(declarations: I) -> Self
        where
            I: IntoIterator<Item = S>,
            S: Into<String>,
        {
            Self {
                declarations: Some(declarations.into_iter().map(Into::into).collect()),
                load_count: AtomicUsize::new(0),
            }
        }

        /// Source that behaves like a missing `modules.info`
        pub fn missing() -> Self {
            Self {
                declarations: None,
                load_count: AtomicUsize::new(0),
            }
        }

        pub fn load_count(&self) -> usize {
            self.load_count.load(Ordering::SeqCst)
        }
    }

    impl ModuleSource for InMemoryModuleSource {
        fn load(&self) -> Result<Vec<String>> {
            self.load_count.fetch_add(1, Ordering::SeqCst);
            self.declarations
                .clone()
                .ok_or_else(|| LaunchError::ModuleDeclarations {
                    path: PathBuf::from("runtime-deps/modules.info"),
                    source: std::io::Error::from(std::io::ErrorKind::NotFound),
                })
        }
    }
}
