use std::collections::{HashSet, VecDeque};
use std::fmt;
use std::sync::Arc;

use crate::{ContentExpr, Fragment, ModelError, Node, PosHit};

/// Name of the node type used for text runs.
pub const TEXT_TYPE: &str = "text";

/// Predicate deciding whether the drop cursor is suppressed inside a node,
/// given where the pointer hit the document.
pub type DropCursorPredicate = fn(&Node, &PosHit) -> bool;

/// Whether a node type lets the drop cursor show inside it.
#[derive(Clone, Copy, Default)]
pub enum DropCursorPolicy {
    #[default]
    Allow,
    Disable,
    When(DropCursorPredicate),
}

impl DropCursorPolicy {
    /// True when the drop cursor must not be shown for `hit` inside `node`.
    pub fn disables(&self, node: &Node, hit: &PosHit) -> bool {
        match self {
            DropCursorPolicy::Allow => false,
            DropCursorPolicy::Disable => true,
            DropCursorPolicy::When(predicate) => predicate(node, hit),
        }
    }
}

impl fmt::Debug for DropCursorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DropCursorPolicy::Allow => f.write_str("Allow"),
            DropCursorPolicy::Disable => f.write_str("Disable"),
            DropCursorPolicy::When(_) => f.write_str("When(..)"),
        }
    }
}

/// Declarative description of a node type, turned into a [`NodeType`] by
/// [`Schema::new`].
#[derive(Debug, Clone)]
pub struct NodeSpec {
    pub name: String,
    pub content: String,
    pub groups: Vec<String>,
    pub inline: bool,
    pub drop_cursor: DropCursorPolicy,
}

impl NodeSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: String::new(),
            groups: Vec::new(),
            inline: false,
            drop_cursor: DropCursorPolicy::Allow,
        }
    }

    pub fn content(mut self, expr: impl Into<String>) -> Self {
        self.content = expr.into();
        self
    }

    /// Space-separated group names, e.g. `"block list"`.
    pub fn group(mut self, groups: &str) -> Self {
        self.groups = groups.split_whitespace().map(str::to_string).collect();
        self
    }

    pub fn inline(mut self) -> Self {
        self.inline = true;
        self
    }

    pub fn drop_cursor(mut self, policy: DropCursorPolicy) -> Self {
        self.drop_cursor = policy;
        self
    }
}

#[derive(Debug)]
pub struct NodeType {
    name: String,
    groups: Vec<String>,
    content: ContentExpr,
    inline: bool,
    inline_content: bool,
    drop_cursor: DropCursorPolicy,
}

impl NodeType {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn groups(&self) -> &[String] {
        &self.groups
    }

    pub fn content_expr(&self) -> &ContentExpr {
        &self.content
    }

    pub fn is_text(&self) -> bool {
        self.name == TEXT_TYPE
    }

    pub fn is_inline(&self) -> bool {
        self.inline || self.is_text()
    }

    /// Leaf types accept no children (text is a leaf too).
    pub fn is_leaf(&self) -> bool {
        self.content.is_empty()
    }

    /// Whether this type's content is made of inline nodes.
    pub fn inline_content(&self) -> bool {
        self.inline_content
    }

    pub fn drop_cursor(&self) -> DropCursorPolicy {
        self.drop_cursor
    }
}

/// The set of node types a document may be built from.
///
/// The first `NodeSpec` passed to [`Schema::new`] is the top node type.
#[derive(Debug)]
pub struct Schema {
    types: Vec<Arc<NodeType>>,
}

impl Schema {
    pub fn new(specs: Vec<NodeSpec>) -> Result<Arc<Self>, ModelError> {
        if specs.is_empty() {
            return Err(ModelError::EmptySchema);
        }

        let mut seen = HashSet::new();
        for spec in &specs {
            if !seen.insert(spec.name.as_str()) {
                return Err(ModelError::DuplicateNodeType(spec.name.clone()));
            }
        }

        let is_inline = |name: &str| {
            name == TEXT_TYPE || specs.iter().any(|s| s.name == name && s.inline)
        };

        let mut types = Vec::with_capacity(specs.len());
        for spec in &specs {
            let mut content = ContentExpr::parse(&spec.content)?;
            for term in &mut content.terms {
                term.names = expand_names(&specs, &term.names)?;
            }
            let inline_content = content.names().any(is_inline);

            types.push(Arc::new(NodeType {
                name: spec.name.clone(),
                groups: spec.groups.clone(),
                content,
                inline: spec.inline,
                inline_content,
                drop_cursor: spec.drop_cursor,
            }));
        }

        Ok(Arc::new(Self { types }))
    }

    pub fn top_node_type(&self) -> &Arc<NodeType> {
        &self.types[0]
    }

    pub fn node_type(&self, name: &str) -> Option<&Arc<NodeType>> {
        self.types.iter().find(|t| t.name == name)
    }

    pub fn node_types(&self) -> impl Iterator<Item = &Arc<NodeType>> {
        self.types.iter()
    }

    /// Build a non-text node. Content is not validated against the type's
    /// content expression; use [`Node::check`] for that.
    pub fn node(&self, name: &str, children: Vec<Node>) -> Result<Node, ModelError> {
        let kind = self
            .node_type(name)
            .ok_or_else(|| ModelError::UnknownNodeType(name.to_string()))?;
        Ok(Node::new(kind.clone(), Fragment::new(children)))
    }

    pub fn text(&self, text: impl Into<String>) -> Result<Node, ModelError> {
        let kind = self
            .node_type(TEXT_TYPE)
            .ok_or_else(|| ModelError::UnknownNodeType(TEXT_TYPE.to_string()))?;
        Ok(Node::new_text(kind.clone(), text.into()))
    }

    /// Chain of wrapper types, outermost first, that lets a node of type
    /// `target` be inserted into `parent` at child `index`.
    ///
    /// Searches breadth-first, so the shortest chain wins. Every inner
    /// wrapper must be valid as the only child of the one around it. An
    /// empty chain means `parent` accepts `target` there directly.
    pub fn find_wrapping(
        &self,
        parent: &Node,
        index: usize,
        target: &NodeType,
    ) -> Option<Vec<&Arc<NodeType>>> {
        struct Candidate<'s> {
            kind: &'s Arc<NodeType>,
            via: Option<usize>,
        }

        let before: Vec<&str> = parent
            .content()
            .iter()
            .take(index)
            .map(Node::type_name)
            .collect();
        let parent_expr = parent.node_type().content_expr();
        if accepts_next(parent_expr, &before, target.name()) {
            return Some(Vec::new());
        }

        let mut candidates: Vec<Candidate<'_>> = Vec::new();
        let mut queue = VecDeque::new();
        let mut seen = HashSet::new();
        for name in parent_expr.names() {
            if let Some(kind) = self.node_type(name)
                && !kind.is_leaf()
                && accepts_next(parent_expr, &before, name)
                && seen.insert(name.to_string())
            {
                queue.push_back(candidates.len());
                candidates.push(Candidate { kind, via: None });
            }
        }

        while let Some(current) = queue.pop_front() {
            let kind = candidates[current].kind;
            let expr = kind.content_expr();
            if expr.matches_prefix(&[target.name()]) {
                let mut chain = Vec::new();
                let mut step = Some(current);
                while let Some(i) = step {
                    chain.push(candidates[i].kind);
                    step = candidates[i].via;
                }
                chain.reverse();
                return Some(chain);
            }
            for name in expr.names() {
                if let Some(inner) = self.node_type(name)
                    && !inner.is_leaf()
                    && expr.matches(&[name])
                    && seen.insert(name.to_string())
                {
                    queue.push_back(candidates.len());
                    candidates.push(Candidate {
                        kind: inner,
                        via: Some(current),
                    });
                }
            }
        }

        None
    }
}

fn accepts_next(expr: &ContentExpr, prefix: &[&str], next: &str) -> bool {
    let mut seq = prefix.to_vec();
    seq.push(next);
    expr.matches_prefix(&seq)
}

fn expand_names(specs: &[NodeSpec], names: &[String]) -> Result<Vec<String>, ModelError> {
    let mut expanded = Vec::new();
    for name in names {
        if specs.iter().any(|s| &s.name == name) {
            expanded.push(name.clone());
            continue;
        }
        let members: Vec<String> = specs
            .iter()
            .filter(|s| s.groups.iter().any(|g| g == name))
            .map(|s| s.name.clone())
            .collect();
        if members.is_empty() {
            return Err(ModelError::UnknownNodeType(name.clone()));
        }
        expanded.extend(members);
    }
    Ok(expanded)
}
