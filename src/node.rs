use smallvec::SmallVec;

/// Inline capacity for a short edge label.
type Prefix = SmallVec<[u8; 23]>;

/// One node of the tree.
///
/// `prefix` is the edge label leading here from the parent (empty only for
/// the root). `value` is `Some` iff this node is a key node. `children` is
/// kept sorted ascending by the first byte of each child's `prefix`, with no
/// two children sharing a first byte (this is what makes `locate` a binary
/// search instead of a linear scan).
pub(crate) struct Node<V> {
    pub(crate) prefix: Prefix,
    pub(crate) value: Option<V>,
    pub(crate) children: Vec<Node<V>>,
}

impl<V> Default for Node<V> {
    fn default() -> Self {
        Node {
            prefix: Prefix::new(),
            value: None,
            children: Vec::new(),
        }
    }
}

fn common_len(a: &[u8], b: &[u8]) -> usize {
    a.iter().zip(b.iter()).take_while(|(x, y)| x == y).count()
}

fn starts_with(key: &[u8], prefix: &[u8]) -> bool {
    key.len() >= prefix.len() && key[..prefix.len()] == *prefix
}

impl<V> Node<V> {
    fn leaf(prefix: &[u8], value: V) -> Self {
        Node {
            prefix: Prefix::from_slice(prefix),
            value: Some(value),
            children: Vec::new(),
        }
    }

    /// Binary search for the child whose edge begins with `byte`.
    pub(crate) fn locate(&self, byte: u8) -> Result<usize, usize> {
        self.children.binary_search_by_key(&byte, |c| c.prefix[0])
    }

    /// Inserts `child` at the position that keeps `children` sorted.
    /// Panics if a child with the same first byte already exists (callers
    /// never attach two children under the same byte, so this would mean an
    /// invariant was already broken upstream).
    fn attach(&mut self, child: Node<V>) {
        let byte = child.prefix[0];
        match self.locate(byte) {
            Ok(_) => unreachable!("attach: a child with byte {byte} already exists"),
            Err(idx) => self.children.insert(idx, child),
        }
    }

    fn is_empty_leaf(&self) -> bool {
        self.value.is_none() && self.children.is_empty()
    }

    /// If this node holds no value and has exactly one child, absorbs that
    /// child: the node's own edge label is extended by the child's, and the
    /// child's value/children become the node's. Root is never passed here
    /// with merging enabled (see the `is_root` guards on the callers).
    fn merge_single_child(&mut self) {
        if self.value.is_some() || self.children.len() != 1 {
            return;
        }
        let child = self.children.pop().expect("length checked above");
        self.prefix.extend_from_slice(&child.prefix);
        self.value = child.value;
        self.children = child.children;
    }

    pub(crate) fn count_key_nodes(&self) -> usize {
        let mut count = usize::from(self.value.is_some());
        for child in &self.children {
            count += child.count_key_nodes();
        }
        count
    }

    /// `key` is the remaining key *after* this node's own prefix has already
    /// been consumed by the caller (trivially true for the root, whose
    /// prefix is always empty).
    pub(crate) fn insert(&mut self, key: &[u8], value: V) -> Option<V> {
        if key.is_empty() {
            return self.value.replace(value);
        }

        match self.locate(key[0]) {
            Err(idx) => {
                self.children.insert(idx, Node::leaf(key, value));
                None
            }
            Ok(idx) => {
                let child_len = self.children[idx].prefix.len();
                let common = common_len(key, &self.children[idx].prefix);

                if common == child_len {
                    return self.children[idx].insert(&key[common..], value);
                }

                // Edge split: the child's label only partially matches.
                let mut old_child = self.children.remove(idx);
                old_child.prefix = Prefix::from_slice(&old_child.prefix[common..]);

                let mut split = Node {
                    prefix: Prefix::from_slice(&key[..common]),
                    value: None,
                    children: Vec::new(),
                };
                let rest = &key[common..];
                if rest.is_empty() {
                    split.value = Some(value);
                    split.attach(old_child);
                } else {
                    split.attach(old_child);
                    split.attach(Node::leaf(rest, value));
                }
                self.children.insert(idx, split);
                None
            }
        }
    }

    pub(crate) fn get(&self, key: &[u8]) -> Option<&V> {
        if key.is_empty() {
            return self.value.as_ref();
        }
        let idx = self.locate(key[0]).ok()?;
        let child = &self.children[idx];
        if !starts_with(key, &child.prefix) {
            return None;
        }
        child.get(&key[child.prefix.len()..])
    }

    pub(crate) fn get_mut(&mut self, key: &[u8]) -> Option<&mut V> {
        if key.is_empty() {
            return self.value.as_mut();
        }
        let idx = self.locate(key[0]).ok()?;
        let child_len = self.children[idx].prefix.len();
        if !starts_with(key, &self.children[idx].prefix) {
            return None;
        }
        self.children[idx].get_mut(&key[child_len..])
    }

    /// `is_root` disables the self-merge step: the root is exempt from the
    /// "non-root routing node has at least two children" invariant.
    pub(crate) fn remove(&mut self, key: &[u8], is_root: bool) -> Option<V> {
        if key.is_empty() {
            let removed = self.value.take();
            if removed.is_some() && !is_root {
                self.merge_single_child();
            }
            return removed;
        }

        let idx = self.locate(key[0]).ok()?;
        let child_len = self.children[idx].prefix.len();
        if !starts_with(key, &self.children[idx].prefix) {
            return None;
        }

        let removed = self.children[idx].remove(&key[child_len..], false);
        if removed.is_some() {
            if self.children[idx].is_empty_leaf() {
                self.children.remove(idx);
            }
            if !is_root {
                self.merge_single_child();
            }
        }
        removed
    }

    /// Detaches and counts the subtree whose full key-path equals `prefix`
    /// relative to this node, following the same three-way match as point
    /// deletion (exact node, strict-prefix-of-an-edge, or no match at all).
    pub(crate) fn remove_prefix(&mut self, prefix: &[u8], is_root: bool) -> usize {
        let idx = match self.locate(prefix[0]) {
            Ok(idx) => idx,
            Err(_) => return 0,
        };
        let child_len = self.children[idx].prefix.len();
        let common = common_len(prefix, &self.children[idx].prefix);

        let count = if prefix.len() <= child_len {
            if common == prefix.len() {
                self.children.remove(idx).count_key_nodes()
            } else {
                0
            }
        } else if common == child_len {
            let removed = self.children[idx].remove_prefix(&prefix[child_len..], false);
            if removed > 0 && self.children[idx].is_empty_leaf() {
                self.children.remove(idx);
            }
            removed
        } else {
            0
        };

        if count > 0 && !is_root {
            self.merge_single_child();
        }
        count
    }

    pub(crate) fn walk<F: FnMut(&[u8], &V) -> bool>(&self, path: &mut Vec<u8>, f: &mut F) -> bool {
        if let Some(v) = &self.value {
            if f(path, v) {
                return true;
            }
        }
        for child in &self.children {
            let mark = path.len();
            path.extend_from_slice(&child.prefix);
            let stop = child.walk(path, f);
            path.truncate(mark);
            if stop {
                return true;
            }
        }
        false
    }

    #[cfg(test)]
    pub(crate) fn check_invariants(&self, is_root: bool) {
        if !is_root {
            assert!(
                self.value.is_some() || self.children.len() != 1,
                "non-root routing node with exactly one child (I4 violated)"
            );
            assert!(
                self.value.is_some() || !self.children.is_empty(),
                "non-root routing node with zero children (I5 violated)"
            );
        }
        for pair in self.children.windows(2) {
            assert!(
                pair[0].prefix[0] < pair[1].prefix[0],
                "children out of order or sharing a first byte (I2/I3 violated)"
            );
        }
        for child in &self.children {
            child.check_invariants(false);
        }
    }
}
