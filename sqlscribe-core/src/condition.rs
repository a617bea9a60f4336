//! WHERE-clause condition tree and its fluent builder
//!
//! A WHERE expression is a tree of groups rather than a flat token list:
//! the caller expresses precedence directly through explicit sub-groups, and
//! the implicit-AND rule covers the common case of two comparisons chained
//! with no connector in between. Nodes live in a flat arena owned by the
//! enclosing statement, with groups referring to their parent by index.

use std::fmt::{self, Display};
use std::marker::PhantomData;

use crate::builder::StatementHandle;
use crate::comparator::Comparator;
use crate::registry::{SqlBuilder, StmtId};
use crate::value::Value;

/// Index of a node within one statement's condition arena.
pub(crate) type NodeId = usize;

/// A logical connector between sibling condition nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connector {
    And,
    Or,
}

impl Connector {
    /// The bare keyword, used in error messages
    pub fn as_str(&self) -> &'static str {
        match self {
            Connector::And => "AND",
            Connector::Or => "OR",
        }
    }

    /// The rendered separator, spaces included
    fn separator(&self) -> &'static str {
        match self {
            Connector::And => " AND ",
            Connector::Or => " OR ",
        }
    }
}

impl Display for Connector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One unit of a WHERE expression tree.
#[derive(Debug, Clone)]
pub(crate) enum CondNode {
    /// AND/OR separator between siblings
    Connector(Connector),
    /// `column <op> "literal"`
    Comparison {
        column: String,
        comparator: Comparator,
        literal: String,
    },
    /// Parenthesized sub-tree; `parent` is None only for the root
    Group {
        parent: Option<NodeId>,
        children: Vec<NodeId>,
    },
}

/// The condition arena of one statement. Created on the first `where_()`
/// call; node 0 is always the root group.
#[derive(Debug, Clone)]
pub(crate) struct ConditionTree {
    nodes: Vec<CondNode>,
}

impl ConditionTree {
    pub(crate) fn new() -> Self {
        Self {
            nodes: vec![CondNode::Group {
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    pub(crate) fn root(&self) -> NodeId {
        0
    }

    pub(crate) fn is_empty(&self) -> bool {
        match &self.nodes[0] {
            CondNode::Group { children, .. } => children.is_empty(),
            _ => true,
        }
    }

    /// True when the group's last child is a comparison or a sub-group,
    /// i.e. a connector may (explicit) or must (implicit) come next.
    fn last_is_operand(&self, group: NodeId) -> bool {
        let children = match &self.nodes[group] {
            CondNode::Group { children, .. } => children,
            _ => return false,
        };
        match children.last() {
            Some(&last) => !matches!(self.nodes[last], CondNode::Connector(_)),
            None => false,
        }
    }

    fn append(&mut self, group: NodeId, node: CondNode) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(node);
        if let CondNode::Group { children, .. } = &mut self.nodes[group] {
            children.push(id);
        }
        id
    }

    /// Append a comparison leaf, inserting the implicit AND when it directly
    /// follows another comparison or group.
    pub(crate) fn push_comparison(
        &mut self,
        group: NodeId,
        column: &str,
        comparator: Comparator,
        literal: String,
    ) {
        if self.last_is_operand(group) {
            self.append(group, CondNode::Connector(Connector::And));
        }
        self.append(
            group,
            CondNode::Comparison {
                column: column.to_string(),
                comparator,
                literal,
            },
        );
    }

    /// Append an explicit connector. Returns false when the call is
    /// redundant (group empty, or previous sibling already a connector) and
    /// nothing was appended.
    pub(crate) fn push_connector(&mut self, group: NodeId, connector: Connector) -> bool {
        if !self.last_is_operand(group) {
            return false;
        }
        self.append(group, CondNode::Connector(connector));
        true
    }

    /// Open a nested group under `group`, applying the same adjacency rule
    /// as comparisons. Returns the new group's id.
    pub(crate) fn open_group(&mut self, group: NodeId) -> NodeId {
        if self.last_is_operand(group) {
            self.append(group, CondNode::Connector(Connector::And));
        }
        self.append(
            group,
            CondNode::Group {
                parent: Some(group),
                children: Vec::new(),
            },
        )
    }

    /// Parent of a group; the root is its own parent.
    pub(crate) fn parent_of(&self, group: NodeId) -> NodeId {
        match &self.nodes[group] {
            CondNode::Group {
                parent: Some(parent),
                ..
            } => *parent,
            _ => group,
        }
    }

    /// Render the whole tree. The root group is unwrapped; nested groups
    /// render inside parentheses.
    pub(crate) fn sql(&self) -> String {
        self.render_children(0)
    }

    fn render_children(&self, group: NodeId) -> String {
        let children = match &self.nodes[group] {
            CondNode::Group { children, .. } => children,
            _ => return String::new(),
        };
        let mut out = String::new();
        for &child in children {
            match &self.nodes[child] {
                CondNode::Connector(connector) => out.push_str(connector.separator()),
                CondNode::Comparison {
                    column,
                    comparator,
                    literal,
                } => {
                    out.push_str(column);
                    out.push(' ');
                    out.push_str(comparator.as_str());
                    out.push_str(" \"");
                    out.push_str(literal);
                    out.push('"');
                }
                CondNode::Group { .. } => {
                    out.push('(');
                    out.push_str(&self.render_children(child));
                    out.push(')');
                }
            }
        }
        out
    }
}

/// Fluent handle over one statement's WHERE tree, positioned inside one
/// group. Obtained from a statement builder's `where_()`; `end_where()`
/// hands back the statement builder of type `S`.
#[derive(Debug)]
pub struct WhereClause<'a, S> {
    builder: &'a mut SqlBuilder,
    stmt: StmtId,
    group: NodeId,
    owner: PhantomData<S>,
}

impl<'a, S: StatementHandle<'a>> WhereClause<'a, S> {
    pub(crate) fn new(builder: &'a mut SqlBuilder, stmt: StmtId, group: NodeId) -> Self {
        Self {
            builder,
            stmt,
            group,
            owner: PhantomData,
        }
    }

    fn comparison(self, column: &str, comparator: Comparator, value: Value) -> Self {
        self.builder
            .push_condition(self.stmt, self.group, column, comparator, value);
        self
    }

    /// Append `column = "value"`
    pub fn equal(self, column: &str, value: impl Into<Value>) -> Self {
        self.comparison(column, Comparator::Equal, value.into())
    }

    /// Append `column <> "value"`
    pub fn not_equal(self, column: &str, value: impl Into<Value>) -> Self {
        self.comparison(column, Comparator::NotEqual, value.into())
    }

    /// Append `column > "value"`
    pub fn more_than(self, column: &str, value: impl Into<Value>) -> Self {
        self.comparison(column, Comparator::MoreThan, value.into())
    }

    /// Append `column < "value"`
    pub fn less_than(self, column: &str, value: impl Into<Value>) -> Self {
        self.comparison(column, Comparator::LessThan, value.into())
    }

    /// Append `column LIKE "value"`
    pub fn like(self, column: &str, value: impl Into<Value>) -> Self {
        self.comparison(column, Comparator::Like, value.into())
    }

    /// Append an explicit AND. Redundant calls are recorded as an error and
    /// ignored.
    pub fn and_(self) -> Self {
        self.builder
            .push_where_connector(self.stmt, self.group, Connector::And);
        self
    }

    /// Append an explicit OR. Redundant calls are recorded as an error and
    /// ignored.
    pub fn or_(self) -> Self {
        self.builder
            .push_where_connector(self.stmt, self.group, Connector::Or);
        self
    }

    /// Open a parenthesized sub-group and descend into it.
    pub fn sub_condition(mut self) -> Self {
        self.group = self.builder.open_where_group(self.stmt, self.group);
        self
    }

    /// Return to the enclosing group. On the root this is a no-op.
    pub fn finish_sub_condition(mut self) -> Self {
        self.group = self.builder.parent_where_group(self.stmt, self.group);
        self
    }

    /// End the condition chain and return the owning statement's handle.
    pub fn end_where(self) -> S {
        S::from_parts(self.builder, self.stmt)
    }

    /// Render this statement's WHERE tree (root unwrapped).
    pub fn sql(&self) -> String {
        self.builder.where_sql(self.stmt)
    }
}
