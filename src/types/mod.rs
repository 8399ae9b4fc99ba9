//! Shared types used throughout the library.

mod direction;

pub use direction::Direction;

use crate::error::{PackError, Result};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Namespace assumed when a block or texture omits one.
pub const DEFAULT_NAMESPACE: &str = "minecraft";

/// A single block state, e.g. `minecraft:oak_stairs[facing=north,half=bottom]`.
///
/// Properties are kept sorted so two blocks with the same state compare and
/// hash identically regardless of insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Block {
    namespace: String,
    base_name: String,
    properties: BTreeMap<String, String>,
}

impl Block {
    pub fn new(namespace: impl Into<String>, base_name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            base_name: base_name.into(),
            properties: BTreeMap::new(),
        }
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Get the namespace (e.g., "minecraft").
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Get the block name without namespace (e.g., "stone").
    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    /// Get the namespaced name (e.g., "minecraft:stone").
    pub fn namespaced_name(&self) -> String {
        format!("{}:{}", self.namespace, self.base_name)
    }

    pub fn properties(&self) -> &BTreeMap<String, String> {
        &self.properties
    }

    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(|s| s.as_str())
    }

    /// Build the blockstate property string, e.g. "facing=north,half=bottom".
    pub fn property_string(&self) -> String {
        self.properties
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.base_name)?;
        if !self.properties.is_empty() {
            write!(f, "[{}]", self.property_string())?;
        }
        Ok(())
    }
}

impl FromStr for Block {
    type Err = PackError;

    /// Parse `namespace:name[key=value,...]`. The namespace and property list
    /// are optional.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let (name, props) = match s.split_once('[') {
            Some((name, rest)) => {
                let props = rest.strip_suffix(']').ok_or_else(|| {
                    PackError::InvalidBlock(format!("Unclosed property list in '{}'", s))
                })?;
                (name, Some(props))
            }
            None => (s, None),
        };

        let (namespace, base_name) = name.split_once(':').unwrap_or((DEFAULT_NAMESPACE, name));
        if namespace.is_empty() || base_name.is_empty() {
            return Err(PackError::InvalidBlock(format!("Missing block name in '{}'", s)));
        }

        let mut block = Block::new(namespace, base_name);
        for pair in props.into_iter().flat_map(|p| p.split(',')).filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').ok_or_else(|| {
                PackError::InvalidBlock(format!("Invalid property '{}'. Use key=value", pair))
            })?;
            block = block.with_property(key.trim(), value.trim());
        }
        Ok(block)
    }
}

/// A base block plus zero or more overlay blocks forming one in-world state
/// (e.g. a waterlogged fence is `[fence, water]`).
///
/// Equality and hashing are order sensitive: `[a, b]` and `[b, a]` are
/// different stacks.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BlockStack {
    base_block: Block,
    extra_blocks: Vec<Block>,
}

impl BlockStack {
    pub fn new(base_block: Block) -> Self {
        Self {
            base_block,
            extra_blocks: Vec::new(),
        }
    }

    pub fn with_extra(mut self, block: Block) -> Self {
        self.extra_blocks.push(block);
        self
    }

    /// Build a stack from blocks in order. The first block is the base.
    pub fn from_blocks(blocks: impl IntoIterator<Item = Block>) -> Result<Self> {
        let mut blocks = blocks.into_iter();
        let base_block = blocks.next().ok_or(PackError::EmptyBlockStack)?;
        Ok(Self {
            base_block,
            extra_blocks: blocks.collect(),
        })
    }

    pub fn base_block(&self) -> &Block {
        &self.base_block
    }

    pub fn extra_blocks(&self) -> &[Block] {
        &self.extra_blocks
    }

    /// Number of blocks in the stack. Always at least 1.
    pub fn len(&self) -> usize {
        1 + self.extra_blocks.len()
    }

    /// Iterate over the base block followed by the extra blocks.
    pub fn iter(&self) -> impl Iterator<Item = &Block> {
        std::iter::once(&self.base_block).chain(self.extra_blocks.iter())
    }
}

impl From<Block> for BlockStack {
    fn from(block: Block) -> Self {
        BlockStack::new(block)
    }
}

impl fmt::Display for BlockStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, block) in self.iter().enumerate() {
            if i > 0 {
                write!(f, " + ")?;
            }
            write!(f, "{}", block)?;
        }
        Ok(())
    }
}
