//! Flat preorder index over one slide's block tree, and the claimed set.

use slide_fit::{BlockKind, SemanticBlock, SlideSource};
use smallvec::SmallVec;

/// Position of a block in its slide's preorder walk.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId(usize);

impl BlockId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Clone, Debug)]
struct IndexedBlock<'a> {
    block: &'a SemanticBlock,
    parent: Option<BlockId>,
    /// One past the last descendant in preorder.
    subtree_end: usize,
}

/// Read-only arena over a slide's blocks in document order.
#[derive(Clone, Debug)]
pub struct SlideIndex<'a> {
    nodes: Vec<IndexedBlock<'a>>,
    roots: SmallVec<[BlockId; 8]>,
}

impl<'a> SlideIndex<'a> {
    pub fn new(slide: &'a SlideSource) -> Self {
        let mut index = Self {
            nodes: Vec::new(),
            roots: SmallVec::with_capacity(slide.blocks.len()),
        };
        for block in &slide.blocks {
            let id = index.push(block, None);
            index.roots.push(id);
        }
        index
    }

    fn push(&mut self, block: &'a SemanticBlock, parent: Option<BlockId>) -> BlockId {
        let id = BlockId(self.nodes.len());
        self.nodes.push(IndexedBlock {
            block,
            parent,
            subtree_end: id.0 + 1,
        });
        for child in block.children() {
            self.push(child, Some(id));
        }
        let end = self.nodes.len();
        if let Some(node) = self.nodes.get_mut(id.0) {
            node.subtree_end = end;
        }
        id
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Block behind `id`. Ids only come from this index, so lookups hit.
    pub fn block(&self, id: BlockId) -> &'a SemanticBlock {
        self.nodes[id.0].block
    }

    pub fn parent(&self, id: BlockId) -> Option<BlockId> {
        self.nodes.get(id.0).and_then(|node| node.parent)
    }

    /// Top-level blocks of the slide.
    pub fn roots(&self) -> &[BlockId] {
        &self.roots
    }

    /// All blocks whose kind is in `kinds`, in document order.
    pub fn of_kinds(&self, kinds: &[BlockKind]) -> Vec<BlockId> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| kinds.contains(&node.block.kind))
            .map(|(idx, _)| BlockId(idx))
            .collect()
    }

    /// Strict descendants of `id` in document order.
    pub fn descendants(&self, id: BlockId) -> impl Iterator<Item = BlockId> {
        let end = self.nodes.get(id.0).map_or(id.0, |node| node.subtree_end);
        (id.0 + 1..end).map(BlockId)
    }

    /// Direct children of `id` in document order.
    pub fn children(&self, id: BlockId) -> Vec<BlockId> {
        self.descendants(id)
            .filter(|child| self.parent(*child) == Some(id))
            .collect()
    }

    /// Descendants of `id` with a kind in `kinds`, not descending into matches.
    pub fn descendants_of(&self, id: BlockId, kinds: &[BlockKind]) -> Vec<BlockId> {
        let mut out = Vec::new();
        let end = self.nodes.get(id.0).map_or(id.0, |node| node.subtree_end);
        let mut idx = id.0 + 1;
        while idx < end {
            let node = &self.nodes[idx];
            if kinds.contains(&node.block.kind) {
                out.push(BlockId(idx));
                idx = node.subtree_end;
            } else {
                idx += 1;
            }
        }
        out
    }

    /// Nearest ancestor of `id` with a kind in `kinds`.
    pub fn ancestor_of_kind(&self, id: BlockId, kinds: &[BlockKind]) -> Option<BlockId> {
        let mut current = self.parent(id);
        while let Some(ancestor) = current {
            if kinds.contains(&self.block(ancestor).kind) {
                return Some(ancestor);
            }
            current = self.parent(ancestor);
        }
        None
    }

    /// First later sibling of `id` with `kind`.
    pub fn next_sibling_of_kind(&self, id: BlockId, kind: BlockKind) -> Option<BlockId> {
        let siblings: Vec<BlockId> = match self.parent(id) {
            Some(parent) => self.children(parent),
            None => self.roots.to_vec(),
        };
        siblings
            .into_iter()
            .skip_while(|sibling| *sibling != id)
            .skip(1)
            .find(|sibling| self.block(*sibling).kind == kind)
    }

    fn subtree(&self, id: BlockId) -> core::ops::Range<usize> {
        let end = self.nodes.get(id.0).map_or(id.0, |node| node.subtree_end);
        id.0..end
    }
}

/// Blocks already consumed by a rule on the current slide.
///
/// Claiming a block claims its whole subtree.
#[derive(Clone, Debug, Default)]
pub struct ClaimSet {
    claimed: Vec<bool>,
}

impl ClaimSet {
    pub fn new(index: &SlideIndex<'_>) -> Self {
        Self {
            claimed: vec![false; index.len()],
        }
    }

    pub fn claim(&mut self, index: &SlideIndex<'_>, id: BlockId) {
        for idx in index.subtree(id) {
            if let Some(flag) = self.claimed.get_mut(idx) {
                *flag = true;
            }
        }
    }

    pub fn is_claimed(&self, id: BlockId) -> bool {
        self.claimed.get(id.0).copied().unwrap_or(false)
    }

    /// Any block in the subtree of `id`, itself included, is claimed.
    pub fn touches(&self, index: &SlideIndex<'_>, id: BlockId) -> bool {
        index.subtree(id).any(|idx| self.claimed.get(idx).copied().unwrap_or(false))
    }

    pub fn claimed_count(&self) -> usize {
        self.claimed.iter().filter(|flag| **flag).count()
    }
}
