//! Symbols declared by a module: methods, regions and module variables.

use smol_str::SmolStr;

use crate::base::{Span, TextRange};
use crate::parser::SyntaxNode;

/// Index of a region in [`SymbolTree::regions_flat`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegionId(pub(crate) usize);

/// A `#Region … #EndRegion` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionSymbol {
    pub name: SmolStr,
    /// From the start of `#Region` to the end of `#EndRegion`
    pub range: Span,
    pub name_range: Span,
    pub text_range: TextRange,
    pub parent: Option<RegionId>,
    pub children: Vec<RegionId>,
}

/// A procedure or function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSymbol {
    pub name: SmolStr,
    pub is_function: bool,
    pub export: bool,
    pub range: Span,
    pub sub_name_range: Span,
    /// Byte range of the subroutine node, used to map nodes back to symbols
    pub node_range: TextRange,
    /// Innermost region containing the method
    pub region: Option<RegionId>,
}

/// A module-level variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableSymbol {
    pub name: SmolStr,
    pub export: bool,
    pub range: Span,
    pub region: Option<RegionId>,
}

/// Declared symbols of one module, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolTree {
    pub(crate) methods: Vec<MethodSymbol>,
    pub(crate) regions: Vec<RegionSymbol>,
    pub(crate) variables: Vec<VariableSymbol>,
}

impl SymbolTree {
    pub fn methods(&self) -> &[MethodSymbol] {
        &self.methods
    }

    pub fn variables(&self) -> &[VariableSymbol] {
        &self.variables
    }

    /// All regions, nested ones included, ordered by start
    pub fn regions_flat(&self) -> &[RegionSymbol] {
        &self.regions
    }

    pub fn region(&self, id: RegionId) -> &RegionSymbol {
        &self.regions[id.0]
    }

    /// Regions not nested in another region
    pub fn file_level_regions(&self) -> impl Iterator<Item = &RegionSymbol> {
        self.regions.iter().filter(|r| r.parent.is_none())
    }

    /// Method declared by a `SUB` node
    pub fn method_symbol(&self, node: &SyntaxNode) -> Option<&MethodSymbol> {
        let range = node.text_range();
        self.methods.iter().find(|m| m.node_range == range)
    }

    /// Method by name, ignoring case
    pub fn method_by_name(&self, name: &str) -> Option<&MethodSymbol> {
        let name = name.to_lowercase();
        self.methods.iter().find(|m| m.name.to_lowercase() == name)
    }
}
