//! Compact outline notation for forests
//!
//! `A(B(D,E),C)` is a root `A` with children `B` and `C`, where `B` has the
//! children `D` and `E`. Top-level commas separate roots: `A(B),X`.
//! Whitespace around names is ignored.

use crate::tree::{ArenaTree, Node, NodeId, NodeKind, Tree};
use anyhow::{anyhow, bail, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'s> {
    Name(&'s str),
    Open,
    Close,
    Comma,
}

fn tokenize(input: &str) -> Vec<(usize, Token<'_>)> {
    let mut tokens = Vec::new();
    let mut start = None;

    for (pos, ch) in input.char_indices() {
        let punct = match ch {
            '(' => Some(Token::Open),
            ')' => Some(Token::Close),
            ',' => Some(Token::Comma),
            _ => None,
        };
        match punct {
            Some(token) => {
                if let Some(begin) = start.take() {
                    push_name(&mut tokens, input, begin, pos);
                }
                tokens.push((pos, token));
            }
            None if start.is_none() => start = Some(pos),
            None => {}
        }
    }
    if let Some(begin) = start {
        push_name(&mut tokens, input, begin, input.len());
    }
    tokens
}

fn push_name<'s>(tokens: &mut Vec<(usize, Token<'s>)>, input: &'s str, begin: usize, end: usize) {
    let name = input[begin..end].trim();
    if !name.is_empty() {
        tokens.push((begin, Token::Name(name)));
    }
}

/// What the parser accepts next
#[derive(Debug, Clone, Copy)]
enum Expect<'s> {
    /// Start of input or just after `(`: a name, or nothing at all
    Group,
    /// After a comma: a name
    Name,
    /// After a name: `(`, a comma, `)` or the end
    Named(NodeId, &'s str),
    /// After `)`: a comma, `)` or the end
    Closed,
}

/// Groups still waiting for their `)`, innermost last
struct OpenGroups<'s> {
    stack: Vec<(NodeId, &'s str)>,
}

impl<'s> OpenGroups<'s> {
    fn parent(&self) -> Option<NodeId> {
        self.stack.last().map(|&(id, _)| id)
    }

    fn close(&mut self, offset: usize) -> Result<()> {
        if self.stack.pop().is_none() {
            bail!("unexpected input at byte {}", offset);
        }
        Ok(())
    }

    fn unexpected(&self, offset: usize) -> anyhow::Error {
        match self.stack.last() {
            Some((_, name)) => anyhow!("expected ')' closing '{}' at byte {}", name, offset),
            None => anyhow!("unexpected input at byte {}", offset),
        }
    }
}

impl<D: Default> ArenaTree<D> {
    /// Build a forest from outline notation
    ///
    /// Nodes written with a parenthesised group become containers, the rest
    /// leaves. Payloads are `D::default()`. Nesting depth is bounded only by
    /// memory.
    ///
    /// # Errors
    ///
    /// Returns an error on unbalanced parentheses, missing names or trailing
    /// input.
    pub fn parse_outline(input: &str) -> Result<Self> {
        let mut tree = ArenaTree::new();
        let mut open = OpenGroups { stack: Vec::new() };
        let mut expect = Expect::Group;

        for (offset, token) in tokenize(input) {
            expect = match (expect, token) {
                (Expect::Group | Expect::Name, Token::Name(name)) => {
                    let node = Node::leaf_default(name);
                    let id = match open.parent() {
                        Some(parent) => tree.add_child(parent, node),
                        None => tree.add_root(node),
                    };
                    Expect::Named(id, name)
                }
                (Expect::Group, Token::Close) => {
                    open.close(offset)?;
                    Expect::Closed
                }
                (Expect::Group | Expect::Name, _) => {
                    bail!("expected a node name at byte {}", offset)
                }
                (Expect::Named(id, name), Token::Open) => {
                    if let Some(node) = tree.get_mut(id) {
                        node.kind = NodeKind::Container;
                    }
                    open.stack.push((id, name));
                    Expect::Group
                }
                (Expect::Named(..) | Expect::Closed, Token::Comma) => Expect::Name,
                (Expect::Named(..) | Expect::Closed, Token::Close) => {
                    open.close(offset)?;
                    Expect::Closed
                }
                (Expect::Named(..) | Expect::Closed, _) => return Err(open.unexpected(offset)),
            };
        }

        if let Expect::Name = expect {
            bail!("expected a node name at byte {}", input.len());
        }
        if !open.stack.is_empty() {
            return Err(open.unexpected(input.len()));
        }
        Ok(tree)
    }
}

enum Step {
    Enter(NodeId),
    Separator,
    Close,
}

fn push_group(stack: &mut Vec<Step>, ids: Vec<NodeId>) {
    for (index, id) in ids.into_iter().enumerate().rev() {
        stack.push(Step::Enter(id));
        if index > 0 {
            stack.push(Step::Separator);
        }
    }
}

/// Render any parent/children relation in outline notation
///
/// Shared by the physical and the filtered rendering.
pub(crate) fn render<N, C>(roots: Vec<NodeId>, name: N, children: C) -> String
where
    N: Fn(NodeId) -> String,
    C: Fn(NodeId) -> Vec<NodeId>,
{
    let mut out = String::new();
    let mut stack = Vec::new();
    push_group(&mut stack, roots);

    while let Some(step) = stack.pop() {
        match step {
            Step::Enter(id) => {
                out.push_str(&name(id));
                let kids = children(id);
                if !kids.is_empty() {
                    out.push('(');
                    stack.push(Step::Close);
                    push_group(&mut stack, kids);
                }
            }
            Step::Separator => out.push(','),
            Step::Close => out.push(')'),
        }
    }
    out
}

pub(crate) fn node_name<T: Tree + ?Sized>(tree: &T, id: NodeId) -> String {
    tree.get(id).map(|n| n.name.clone()).unwrap_or_default()
}

/// Render the physical forest in outline notation
pub fn outline<T: Tree + ?Sized>(tree: &T) -> String {
    render(
        tree.roots().collect(),
        |id| node_name(tree, id),
        |id| tree.children(id).collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_nested() {
        let tree: ArenaTree<()> = ArenaTree::parse_outline("A(B(D,E),C)").unwrap();
        assert_eq!(tree.node_count(), 5);
        assert_eq!(tree.root_count(), 1);

        let a = tree.find_by_name("A").unwrap();
        let b = tree.find_by_name("B").unwrap();
        let e = tree.find_by_name("E").unwrap();
        assert_eq!(tree.child_count(a), 2);
        assert_eq!(tree.parent(e), Some(b));
        assert!(tree.get(b).unwrap().is_container());
        assert!(tree.get(e).unwrap().is_leaf());
    }

    #[test]
    fn test_parse_forest_and_whitespace() {
        let tree: ArenaTree<()> = ArenaTree::parse_outline(" A ( B ) , X ").unwrap();
        assert_eq!(tree.root_count(), 2);
        assert_eq!(outline(&tree), "A(B),X");
    }

    #[test]
    fn test_parse_empty() {
        let tree: ArenaTree<()> = ArenaTree::parse_outline("").unwrap();
        assert!(tree.is_empty());
        assert_eq!(outline(&tree), "");
    }

    #[test]
    fn test_parse_errors() {
        let unbalanced = ArenaTree::<()>::parse_outline("A(B");
        assert!(unbalanced.unwrap_err().to_string().contains("expected ')'"));

        let trailing = ArenaTree::<()>::parse_outline("A)B");
        assert!(trailing.unwrap_err().to_string().contains("unexpected input at byte 1"));

        assert!(ArenaTree::<()>::parse_outline("A(,B)").is_err());
        assert!(ArenaTree::<()>::parse_outline("A,").is_err());

        let unopened = ArenaTree::<()>::parse_outline("A(B)C");
        assert!(unopened.unwrap_err().to_string().contains("unexpected input at byte 4"));
        let unclosed = ArenaTree::<()>::parse_outline("A(B C(D)");
        assert!(unclosed.unwrap_err().to_string().contains("closing 'A'"));
        let stray_group = ArenaTree::<()>::parse_outline("A(B)(C)");
        assert!(stray_group.unwrap_err().to_string().contains("unexpected input at byte 4"));
    }

    #[test]
    fn test_parse_empty_group() {
        let tree: ArenaTree<()> = ArenaTree::parse_outline("A(),B").unwrap();
        let a = tree.find_by_name("A").unwrap();
        assert!(tree.get(a).unwrap().is_container());
        assert_eq!(tree.child_count(a), 0);
        assert_eq!(outline(&tree), "A,B");
    }

    #[test]
    fn test_parse_deep_nesting_does_not_recurse() {
        let depth = 200_000;
        let source = format!("{}z{}", "a(".repeat(depth), ")".repeat(depth));
        let tree: ArenaTree<()> = ArenaTree::parse_outline(&source).unwrap();

        assert_eq!(tree.node_count(), depth + 1);
        assert_eq!(tree.root_count(), 1);
        let leaf = NodeId(depth);
        assert!(tree.get(leaf).unwrap().is_leaf());
        assert_eq!(tree.depth(leaf), depth);

        let unclosed = format!("{}z", "a(".repeat(depth));
        let err = ArenaTree::<()>::parse_outline(&unclosed).unwrap_err();
        assert!(err.to_string().contains("expected ')' closing 'a'"));
    }

    #[test]
    fn test_render_roundtrip_shape() {
        let source = "root(a(a1,a2(a21)),b,c(c1))";
        let tree: ArenaTree<()> = ArenaTree::parse_outline(source).unwrap();
        assert_eq!(outline(&tree), source);
    }
}
