//! Ordered course store: an unbalanced binary search tree keyed by course number.

use termtree::Tree;
use tracing::{instrument, trace};

use crate::domain::course::Course;

type Link = Option<Box<Node>>;

#[derive(Debug)]
struct Node {
    course: Course,
    left: Link,
    right: Link,
}

impl Node {
    fn leaf(course: Course) -> Self {
        Self {
            course,
            left: None,
            right: None,
        }
    }
}

/// Binary search tree of courses ordered by course number.
///
/// Keys in a node's left subtree compare less than the node's key, keys in the
/// right subtree compare greater than or equal. Inserting an existing key adds a
/// second node on the right; nothing is ever overwritten.
///
/// The tree is not rebalanced: inserting already sorted numbers degrades it to a
/// list. All operations walk the tree iteratively, so depth never grows the call stack.
#[derive(Debug, Default)]
pub struct CourseTree {
    root: Link,
    len: usize,
}

impl CourseTree {
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// Adds the course as a new leaf. Equal keys descend to the right.
    #[instrument(level = "trace", skip(self, course), fields(number = course.number()))]
    pub fn insert(&mut self, course: Course) {
        let mut link = &mut self.root;
        while let Some(node) = link {
            link = if course.number() < node.course.number() {
                &mut node.left
            } else {
                &mut node.right
            };
        }
        *link = Some(Box::new(Node::leaf(course)));
        self.len += 1;
    }

    /// Returns the first course on the descent path whose number matches exactly.
    ///
    /// The match is case-sensitive. With duplicate keys, which duplicate is
    /// returned is unspecified beyond "one with that number".
    pub fn search(&self, number: &str) -> Option<&Course> {
        let mut link = self.root.as_deref();
        while let Some(node) = link {
            let key = node.course.number();
            if key == number {
                return Some(&node.course);
            }
            link = if number < key {
                node.left.as_deref()
            } else {
                node.right.as_deref()
            };
        }
        trace!(number, "course not found");
        None
    }

    /// Like [`search`](Self::search), but returns an empty course
    /// (see [`Course::is_empty`]) when nothing matches.
    pub fn search_or_empty(&self, number: &str) -> Course {
        self.search(number).cloned().unwrap_or_default()
    }

    /// In-order traversal, ascending by course number. Each call starts over from the root.
    pub fn iter(&self) -> InOrder<'_> {
        InOrder::new(self.root.as_deref())
    }

    /// Number of inserts performed, duplicates included.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Height of the tree: 0 when empty, 1 for a single node.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack: Vec<(&Node, usize)> =
            self.root.as_deref().map(|n| (n, 1)).into_iter().collect();

        while let Some((node, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            for child in [node.left.as_deref(), node.right.as_deref()].into_iter().flatten() {
                stack.push((child, depth + 1));
            }
        }

        max_depth
    }
}

impl Drop for CourseTree {
    // Children are detached before their parent is freed, so no Box drop recurses.
    fn drop(&mut self) {
        let mut stack: Vec<Box<Node>> = self.root.take().into_iter().collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
    }
}

impl<'a> IntoIterator for &'a CourseTree {
    type Item = &'a Course;
    type IntoIter = InOrder<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Lazy in-order iterator over a [`CourseTree`].
pub struct InOrder<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> InOrder<'a> {
    fn new(root: Option<&'a Node>) -> Self {
        let mut iter = Self { stack: Vec::new() };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut link: Option<&'a Node>) {
        while let Some(node) = link {
            self.stack.push(node);
            link = node.left.as_deref();
        }
    }
}

impl<'a> Iterator for InOrder<'a> {
    type Item = &'a Course;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        Some(&node.course)
    }
}

/// Levels shown by [`TreeRender`]; deeper subtrees are replaced by an `…` leaf.
pub const MAX_RENDER_DEPTH: usize = 32;

/// Renders a tree's shape for display.
pub trait TreeRender {
    fn to_tree_string(&self) -> Tree<String>;
}

enum Slot<'a> {
    Node(&'a Node, usize),
    Missing,
    Elided,
}

/// A rendered node waiting for its children, which are popped left first.
struct Frame<'a> {
    tree: Tree<String>,
    pending: Vec<Slot<'a>>,
}

impl<'a> Frame<'a> {
    fn open(node: &'a Node, depth: usize) -> Self {
        let slot = |child: Option<&'a Node>| match child {
            Some(child) => Slot::Node(child, depth + 1),
            None => Slot::Missing,
        };
        let pending = match (node.left.as_deref(), node.right.as_deref()) {
            (None, None) => Vec::new(),
            _ if depth >= MAX_RENDER_DEPTH => vec![Slot::Elided],
            (left, right) => vec![slot(right), slot(left)],
        };
        Self {
            tree: Tree::new(node.course.number().to_string()),
            pending,
        }
    }
}

impl TreeRender for CourseTree {
    #[instrument(level = "debug", skip(self))]
    fn to_tree_string(&self) -> Tree<String> {
        let mut rendered = Tree::new("Empty tree".to_string());
        let mut stack: Vec<Frame> = self
            .root
            .as_deref()
            .map(|n| Frame::open(n, 1))
            .into_iter()
            .collect();

        while let Some(frame) = stack.last_mut() {
            match frame.pending.pop() {
                Some(Slot::Node(child, depth)) => stack.push(Frame::open(child, depth)),
                Some(Slot::Missing) => {
                    frame.tree.push(Tree::new("-".to_string()));
                }
                Some(Slot::Elided) => {
                    trace!(number = %frame.tree.root, "subtree below render depth elided");
                    frame.tree.push(Tree::new("…".to_string()));
                }
                None => {
                    if let Some(done) = stack.pop() {
                        match stack.last_mut() {
                            Some(parent) => {
                                parent.tree.push(done.tree);
                            }
                            None => rendered = done.tree,
                        }
                    }
                }
            }
        }

        rendered
    }
}
