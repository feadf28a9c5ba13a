use std::collections::{
    VecDeque,
};
use std::fmt;

use log::{debug, trace};

use crate::{
    BuildError,
    Location,
    Match,
    Result,
};

/// Identifier of a state in an [`AhoCorasick`] automaton.
pub type StateID = usize;

/// Marks an undefined transition.
const FAIL: StateID = StateID::MAX;
const START: StateID = 0;

/// Automaton node.
#[derive(Clone)]
struct Node {
    /// Patterns matched by this node, its own first, then those inherited
    /// through the fail chain.
    matches: Vec<Match>,
    /// Transitions to other nodes, FAIL where undefined.
    transitions: [StateID; 256],
    /// Fail transition id.
    fail: StateID,
    /// Distance from START.
    depth: usize,
}

impl Node {
    fn new(depth: usize) -> Self {
        Self { matches: Vec::new(), transitions: [FAIL; 256], fail: START, depth }
    }
}

//>>>>>>>>>>>>>>>>>>>>>>>>>>>>>>>>>>>>>
// Builder
//<<<<<<<<<<<<<<<<<<<<<<<<<<<<<<<<<<<<<

/// Collects patterns and builds an [`AhoCorasick`] automaton from them.
///
/// Each pattern is identified by its index in insertion order. Duplicate
/// patterns are kept and reported independently.
///
/// ```
/// use dictscan::Builder;
///
/// let ac = Builder::new()
///     .pattern("cat")
///     .patterns(["dog", "bird"])
///     .build()?;
/// assert_eq!(ac.pattern_count(), 3);
/// # Ok::<(), dictscan::BuildError>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct Builder {
    patterns: Vec<Vec<u8>>,
}

impl Builder {
    /// Return a builder with no patterns.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one pattern.
    pub fn pattern(mut self, pattern: impl AsRef<[u8]>) -> Self {
        self.patterns.push(pattern.as_ref().to_vec());
        self
    }

    /// Append every pattern yielded by `patterns`, in order.
    pub fn patterns<I, P>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<[u8]>,
    {
        self.patterns.extend(patterns.into_iter().map(|p| p.as_ref().to_vec()));
        self
    }

    /// Build the automaton.
    ///
    /// # Errors
    ///
    /// - [`BuildError::EmptyPatternSet`] if no pattern was added.
    /// - [`BuildError::InvalidPattern`] for the first zero-length pattern.
    pub fn build(self) -> Result<AhoCorasick> {
        if let Err(err) = self.validate() {
            debug!("rejected pattern set of {} patterns: {}", self.patterns.len(), err);
            return Err(err);
        }

        let mut ac = AhoCorasick {
            nodes: Vec::new(),
            pattern_count: self.patterns.len(),
            max_pattern_len: 0,
        };
        ac.build_trie(&self.patterns);
        ac.max_pattern_len = ac.nodes.iter().map(|node| node.depth).max().unwrap_or(0);
        ac.encode_start_to_start();
        ac.encode_trie_failure();

        debug!(
            "built automaton: {} patterns, {} states, max depth {}",
            ac.pattern_count,
            ac.nodes.len(),
            ac.max_pattern_len,
        );
        Ok(ac)
    }

    fn validate(&self) -> Result<()> {
        if self.patterns.is_empty() {
            return Err(BuildError::EmptyPatternSet);
        }
        match self.patterns.iter().position(|p| p.is_empty()) {
            Some(index) => Err(BuildError::InvalidPattern { index }),
            None => Ok(()),
        }
    }
}

//>>>>>>>>>>>>>>>>>>>>>>>>>>>>>>>>>>>>>
// Automaton
//<<<<<<<<<<<<<<<<<<<<<<<<<<<<<<<<<<<<<

/// Aho-Corasick automaton reporting every overlapping match.
///
/// The automaton is immutable once built. Scans only borrow it, so one
/// automaton can serve any number of concurrent scans.
#[derive(Clone)]
pub struct AhoCorasick {
    nodes: Vec<Node>,
    pattern_count: usize,
    max_pattern_len: usize,
}

impl AhoCorasick {
    /// Build an automaton from `patterns`, identified by their index.
    ///
    /// Shorthand for `Builder::new().patterns(patterns).build()`.
    pub fn new<I, P>(patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<[u8]>,
    {
        Builder::new().patterns(patterns).build()
    }

    /// Return a new [`Builder`].
    pub fn builder() -> Builder {
        Builder::new()
    }

    /// Return the initial state.
    pub fn start_state(&self) -> StateID {
        START
    }

    /// Return the state reached from `id` after consuming `byte`,
    /// following fail transitions until a defined transition is found.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not a state of this automaton.
    pub fn next_state(&self, mut id: StateID, byte: u8) -> StateID {
        loop {
            let next = self.nodes[id].transitions[byte as usize];
            if next != FAIL {
                return next
            } else {
                id = self.nodes[id].fail;
            }
        }
    }

    /// Return every pattern recognized when the automaton is in state `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not a state of this automaton.
    pub fn matches(&self, id: StateID) -> &[Match] {
        &self.nodes[id].matches
    }

    /// Return the number of states, START included.
    pub fn state_count(&self) -> usize {
        self.nodes.len()
    }

    /// Return the number of patterns the automaton was built from.
    pub fn pattern_count(&self) -> usize {
        self.pattern_count
    }

    /// Return the length of the longest pattern, the depth of the deepest state.
    pub fn max_pattern_len(&self) -> usize {
        self.max_pattern_len
    }

    /// Return an iterator over every match in `haystack`, overlapping
    /// matches included.
    ///
    /// Locations are yielded by increasing `end`. Matches sharing an `end`
    /// come longest first.
    pub fn find_overlapping_iter<'a, 'h>(&'a self, haystack: &'h [u8]) -> FindOverlappingIter<'a, 'h> {
        FindOverlappingIter {
            ac: self,
            haystack,
            at: 0,
            state: START,
            match_index: 0,
        }
    }

    /// Collect every match in `haystack`.
    pub fn scan(&self, haystack: &[u8]) -> Vec<Location> {
        self.find_overlapping_iter(haystack).collect()
    }

    /// Return true if any pattern occurs in `haystack`.
    pub fn is_match(&self, haystack: &[u8]) -> bool {
        self.find_overlapping_iter(haystack).next().is_some()
    }

    //>>>>>>>>>>>>>>>>>>>>>>>>>>>>>>>>>>>>>
    // Trie
    //<<<<<<<<<<<<<<<<<<<<<<<<<<<<<<<<<<<<<

    /// Build a trie with a node for each distinct pattern prefix.
    fn build_trie(&mut self, patterns: &[Vec<u8>]) {
        self.add_node(0);
        for (pattern_id, pattern) in patterns.iter().enumerate() {
            let mut current_node_id = START;
            for (depth, byte) in pattern.iter().enumerate() {
                let transition_id = self.nodes[current_node_id].transitions[*byte as usize];
                current_node_id = if transition_id == FAIL {
                    let new_node_id = self.add_node(depth + 1);
                    self.nodes[current_node_id].transitions[*byte as usize] = new_node_id;
                    new_node_id
                } else {
                    transition_id
                };
            }
            let m = Match { pattern_id, pattern_len: pattern.len() };
            self.nodes[current_node_id].matches.push(m);
        }
    }

    /// Encode START->FAIL transitions as START->START.
    fn encode_start_to_start(&mut self) {
        for byte in 0..256 {
            if self.nodes[START].transitions[byte] == FAIL {
                self.nodes[START].transitions[byte] = START;
            }
        }
    }

    /// Encode a fail transition for each node and merge the matches of the
    /// fail node into it.
    ///
    /// Breadth-first order guarantees a node's fail target, which is always
    /// shallower, already holds its complete match list.
    fn encode_trie_failure(&mut self) {
        let mut queue: VecDeque<StateID> = VecDeque::new();

        for byte in 0..256 {
            let transition_id = self.nodes[START].transitions[byte];
            // Skip START->START loops.
            if transition_id == START {
                continue;
            }
            self.nodes[transition_id].fail = START;
            queue.push_back(transition_id);
        }

        while let Some(id) = queue.pop_front() {
            for byte in 0..256 {
                let next_id = self.nodes[id].transitions[byte];
                if next_id == FAIL {
                    continue;
                }

                let fail_id = {
                    let mut fail_id = self.nodes[id].fail;
                    while self.nodes[fail_id].transitions[byte] == FAIL {
                        fail_id = self.nodes[fail_id].fail;
                    }
                    self.nodes[fail_id].transitions[byte]
                };
                debug_assert!(self.nodes[fail_id].depth < self.nodes[next_id].depth);
                self.nodes[next_id].fail = fail_id;

                let (fail_node, next_node) = self.pair_mut(fail_id, next_id);
                next_node.matches.extend_from_slice(&fail_node.matches);
                trace!(
                    "state {} fails to {}, {} matches",
                    next_id,
                    fail_id,
                    next_node.matches.len(),
                );

                queue.push_back(next_id);
            }
        }
    }

    /// Borrow two distinct nodes mutably.
    fn pair_mut(&mut self, a: StateID, b: StateID) -> (&mut Node, &mut Node) {
        debug_assert_ne!(a, b);
        if a < b {
            let (left, right) = self.nodes.split_at_mut(b);
            (&mut left[a], &mut right[0])
        } else {
            let (left, right) = self.nodes.split_at_mut(a);
            (&mut right[0], &mut left[b])
        }
    }

    /// Add a Node and return its id.
    fn add_node(&mut self, depth: usize) -> StateID {
        let id = self.nodes.len();
        self.nodes.push(Node::new(depth));
        id
    }
} // impl AhoCorasick

impl fmt::Debug for AhoCorasick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AhoCorasick")
            .field("states", &self.nodes.len())
            .field("patterns", &self.pattern_count)
            .field("max_pattern_len", &self.max_pattern_len)
            .finish()
    }
}

/// Iterator over overlapping matches, created by
/// [`AhoCorasick::find_overlapping_iter`].
#[derive(Clone, Debug)]
pub struct FindOverlappingIter<'a, 'h> {
    ac: &'a AhoCorasick,
    haystack: &'h [u8],
    /// Number of haystack bytes consumed.
    at: usize,
    state: StateID,
    /// Next match of `state` to yield.
    match_index: usize,
}

impl Iterator for FindOverlappingIter<'_, '_> {
    type Item = Location;

    fn next(&mut self) -> Option<Location> {
        loop {
            if let Some(m) = self.ac.nodes[self.state].matches.get(self.match_index) {
                self.match_index += 1;
                return Some(Location { r#match: *m, end: self.at });
            }
            let byte = *self.haystack.get(self.at)?;
            self.state = self.ac.next_state(self.state, byte);
            self.at += 1;
            self.match_index = 0;
        }
    }
}
