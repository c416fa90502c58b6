use rayon::prelude::*;
use slog::Logger;

use syntax::{DependencyExtractor, Error, Extraction, HeadFinder};
use trees::{Normalizer, NormalizerConfig, Temporal, Tree};

/// A normalized tree and the dependencies extracted from it.
#[derive(Debug, Clone)]
pub struct Processed {
    pub tree: Tree,
    pub extraction: Extraction,
}

/// Normalization followed by dependency extraction.
#[derive(Debug)]
pub struct Pipeline {
    normalizer: Normalizer,
    extractor: DependencyExtractor,
    index_leaves: bool,
}

impl Pipeline {
    pub fn new(normalizer: Normalizer, extractor: DependencyExtractor) -> Self {
        Pipeline {
            normalizer: normalizer,
            extractor: extractor,
            index_leaves: true,
        }
    }

    /// Default normalization with Collins' head rules.
    pub fn collins() -> Self {
        Pipeline::new(
            Normalizer::new(NormalizerConfig::default()),
            DependencyExtractor::new(HeadFinder::collins()),
        )
    }

    /// Content-word heads; `-TMP` marks on noun phrases are kept and
    /// passed to their head nouns.
    pub fn semantic() -> Self {
        let config = NormalizerConfig {
            temporal: Temporal::NpHead,
            ..NormalizerConfig::default()
        };
        Pipeline::new(
            Normalizer::new(config),
            DependencyExtractor::new(HeadFinder::semantic()),
        )
    }

    /// Leave leaf positions untouched; input trees must be indexed already.
    pub fn keep_indices(mut self) -> Self {
        self.index_leaves = false;
        self
    }

    pub fn logger(self, logger: Logger) -> Self {
        Pipeline {
            normalizer: self.normalizer.logger(logger.new(o!("stage" => "normalize"))),
            extractor: self.extractor.logger(logger.new(o!("stage" => "extract"))),
            index_leaves: self.index_leaves,
        }
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    pub fn extractor(&self) -> &DependencyExtractor {
        &self.extractor
    }

    /// Returns `None` when normalization removes the whole tree.
    pub fn process(&self, tree: &Tree) -> Result<Option<Processed>, Error> {
        let tree = match self.normalizer.normalize_whole_tree(tree) {
            Some(t) => t,
            None => return Ok(None),
        };
        let tree = if self.index_leaves {
            tree.index_leaves(1)
        } else {
            tree
        };
        let extraction = self.extractor.extract(&tree)?;
        Ok(Some(Processed {
            tree: tree,
            extraction: extraction,
        }))
    }

    /// Processes trees in parallel; results keep the input order.
    pub fn process_batch(&self, trees: &[Tree]) -> Vec<Result<Option<Processed>, Error>> {
        trees.par_iter().map(|tree| self.process(tree)).collect()
    }
}
