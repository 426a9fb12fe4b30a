//! Grammar oracle deciding whether a script is valid under an ECMAScript edition

use super::feature_detector::{line_column, FeatureDetector};
use crate::models::syntax::{EcmaVersion, SourceKind, SyntaxFailure};
use oxc_allocator::Allocator;
use oxc_parser::{ParseOptions, Parser};
use oxc_span::SourceType;
use parking_lot::Mutex;

/// Decides whether source text parses under a given edition
pub trait GrammarOracle {
    fn parse(&self, source_text: &str, kind: SourceKind, version: EcmaVersion) -> Result<(), SyntaxFailure>;
}

/// Pool of allocators reused across parses
///
/// Each allocator is reset before it goes back into the pool.
#[derive(Default)]
pub struct AllocatorPool {
    allocators: Mutex<Vec<Allocator>>,
}

impl AllocatorPool {
    /// Create a new allocator pool
    pub fn new(size: usize) -> Self {
        let allocators = (0..size).map(|_| Allocator::default()).collect();
        Self {
            allocators: Mutex::new(allocators),
        }
    }

    /// Take an allocator from the pool, or a fresh one when it is empty
    pub fn take(&self) -> Allocator {
        self.allocators.lock().pop().unwrap_or_default()
    }

    /// Return an allocator to the pool for reuse
    pub fn return_allocator(&self, mut allocator: Allocator) {
        allocator.reset();
        self.allocators.lock().push(allocator);
    }

    pub fn available(&self) -> usize {
        self.allocators.lock().len()
    }
}

/// [`GrammarOracle`] backed by the oxc parser
///
/// oxc always parses the latest grammar. Scripts that parse cleanly are then
/// walked by [`FeatureDetector`], and the earliest construct newer than the
/// requested edition becomes the failure.
pub struct OxcGrammarOracle {
    parse_options: ParseOptions,
    allocator_pool: AllocatorPool,
}

impl OxcGrammarOracle {
    pub fn new() -> Self {
        Self {
            parse_options: ParseOptions {
                parse_regular_expression: true,
                allow_return_outside_function: false,
                ..ParseOptions::default()
            },
            allocator_pool: AllocatorPool::new(1),
        }
    }

    fn source_type(kind: SourceKind) -> SourceType {
        SourceType::mjs().with_module(kind == SourceKind::Module)
    }
}

impl Default for OxcGrammarOracle {
    fn default() -> Self {
        Self::new()
    }
}

impl GrammarOracle for OxcGrammarOracle {
    fn parse(&self, source_text: &str, kind: SourceKind, version: EcmaVersion) -> Result<(), SyntaxFailure> {
        let allocator = self.allocator_pool.take();

        let outcome = {
            let ret = Parser::new(&allocator, source_text, Self::source_type(kind))
                .with_options(self.parse_options.clone())
                .parse();

            if let Some(error) = ret.errors.first() {
                tracing::trace!(errors = ret.errors.len(), "parser rejected script");
                Err(SyntaxFailure::parse_error(error.to_string()))
            } else {
                match FeatureDetector::detect(&ret.program, source_text, version).first() {
                    Some(usage) => {
                        let (line, column) = line_column(source_text, usage.offset);
                        Err(SyntaxFailure::unsupported_feature(usage.feature, version, line, column))
                    }
                    None => Ok(()),
                }
            }
        };

        self.allocator_pool.return_allocator(allocator);
        outcome
    }
}
