use std::{cmp::Ordering, collections::HashMap};

use itertools::Itertools;
use log::{debug, trace};

/// End of Transmission Block. Its code closes every compressed message.
pub const ETB_CHAR: char = '\u{0017}';

/// Immutable mapping from each character to its prefix-free code.
///
/// Codes are strings over `'0'` and `'1'`. The table always holds an entry for [`ETB_CHAR`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    codes: HashMap<char, String>,
    symbols_by_code: HashMap<String, char>,
}

impl CodeTable {
    pub fn build(corpus: &str) -> Self {
        let mut frequencies = corpus
            .chars()
            .into_grouping_map_by(|&x| x)
            .fold(0, |acc, _key, _value| acc + 1);
        frequencies.entry(ETB_CHAR).or_insert(1);

        let distinct = frequencies.len();
        let codes = Tree::new(frequencies)
            .map(|tree| tree.generate_codes())
            .unwrap_or_default();

        debug!(
            "built {} codes from a corpus of {} characters ({} distinct)",
            codes.len(),
            corpus.chars().count(),
            distinct
        );
        Self::from_codes(codes)
    }

    pub(crate) fn from_codes(codes: HashMap<char, String>) -> Self {
        let symbols_by_code = codes
            .iter()
            .map(|(ch, code)| (code.clone(), *ch))
            .collect();
        Self {
            codes,
            symbols_by_code,
        }
    }

    pub fn code(&self, ch: char) -> Option<&str> {
        self.codes.get(&ch).map(String::as_str)
    }

    pub fn symbol(&self, code: &str) -> Option<char> {
        self.symbols_by_code.get(code).copied()
    }

    pub fn terminator_code(&self) -> &str {
        self.code(ETB_CHAR).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, &str)> + '_ {
        self.codes.iter().map(|(ch, code)| (*ch, code.as_str()))
    }

    /// Returns an owned copy; changes to it never reach the table.
    pub fn to_map(&self) -> HashMap<char, String> {
        self.codes.clone()
    }
}

#[derive(Debug)]
struct Tree(Box<Node>);

#[derive(Debug)]
struct Node {
    symbol: char,
    frequency: usize,
    children: Option<Children>,
}

#[derive(Debug)]
struct Children {
    zero: Tree,
    one: Tree,
}

impl From<(char, usize)> for Tree {
    fn from((symbol, frequency): (char, usize)) -> Self {
        Self(Box::new(Node {
            symbol,
            frequency,
            children: None,
        }))
    }
}

impl Tree {
    fn new(values: impl IntoIterator<Item = (char, usize)>) -> Option<Self> {
        let trees = Trees::from_iter(values.into_iter().map_into());
        trees.merge()
    }

    fn merged(zero: Tree, one: Tree) -> Self {
        let symbol = tiebreak_symbol(zero.0.symbol, one.0.symbol);
        let frequency = zero.0.frequency + one.0.frequency;
        Self(Box::new(Node {
            symbol,
            frequency,
            children: Some(Children { zero, one }),
        }))
    }

    fn frequency(&self) -> usize {
        self.0.frequency
    }

    /// Sort key: frequency first, then [`ETB_CHAR`] ahead of everything, then character code.
    fn priority(&self) -> (usize, bool, char) {
        (self.0.frequency, self.0.symbol != ETB_CHAR, self.0.symbol)
    }

    fn generate_codes(self) -> HashMap<char, String> {
        let mut result = HashMap::new();
        let mut code = String::new();
        self.generate_codes_inner(&mut code, &mut result);
        result
    }

    fn generate_codes_inner(self, current_code: &mut String, result: &mut HashMap<char, String>) {
        let node = *self.0;
        match node.children {
            None => {
                trace!("code {:?} -> {:?}", node.symbol, current_code);
                result.insert(node.symbol, current_code.to_owned());
            }
            Some(Children { zero, one }) => {
                current_code.push('0');
                zero.generate_codes_inner(current_code, result);
                current_code.pop();
                current_code.push('1');
                one.generate_codes_inner(current_code, result);
                current_code.pop();
            }
        }
    }
}

/// The symbol a merged node sorts by: [`ETB_CHAR`] if either side carries it, else the smaller one.
fn tiebreak_symbol(a: char, b: char) -> char {
    if a == ETB_CHAR || b == ETB_CHAR {
        ETB_CHAR
    } else {
        a.min(b)
    }
}

fn cmp_tree_desc(a: &Tree, b: &Tree) -> Ordering {
    b.priority().cmp(&a.priority())
}

/// Pending trees, kept sorted so the lowest priority sits at the end.
struct Trees(Vec<Tree>);

impl FromIterator<Tree> for Trees {
    fn from_iter<T: IntoIterator<Item = Tree>>(iter: T) -> Self {
        let sorted_trees = iter.into_iter().sorted_by(cmp_tree_desc).collect_vec();
        Self(sorted_trees)
    }
}

impl Trees {
    fn merge(mut self) -> Option<Tree> {
        loop {
            match self.pop_lowest()? {
                PopResult::TreesToMerge { zero, one } => {
                    trace!(
                        "merging {:?} ({}) with {:?} ({})",
                        zero.0.symbol,
                        zero.frequency(),
                        one.0.symbol,
                        one.frequency()
                    );
                    self.insert(Tree::merged(zero, one));
                }
                PopResult::Single(tree) => {
                    return Some(tree);
                }
            }
        }
    }

    fn pop_lowest(&mut self) -> Option<PopResult> {
        let zero = self.0.pop()?;

        let item_result = match self.0.pop() {
            Some(one) => PopResult::TreesToMerge { zero, one },
            None => PopResult::Single(zero),
        };

        Some(item_result)
    }

    fn insert(&mut self, tree: Tree) {
        let index = self
            .0
            .partition_point(|existing| cmp_tree_desc(existing, &tree) == Ordering::Less);
        self.0.insert(index, tree);
    }
}

enum PopResult {
    TreesToMerge { zero: Tree, one: Tree },
    Single(Tree),
}
