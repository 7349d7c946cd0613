//! Character-level diff.
//!
//! Produces an ordered list of equal/added/removed spans that reconstructs
//! both inputs: concatenating the `Equal` and `Removed` spans yields the old
//! text, concatenating the `Equal` and `Added` spans yields the new text.
//!
//! The common prefix and suffix are trimmed first, then the remaining middle
//! is diffed with Myers' O(ND) algorithm. Recorded sessions mostly change a
//! few characters per event, so D stays small; when it does not, the middle
//! is reported as a single removal followed by a single insertion.

/// Largest edit distance explored before falling back to a coarse diff.
///
/// The backtracking trace costs O(D²) memory.
const MAX_EDIT_COST: usize = 1024;

/// One run of the diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffSpan {
    /// Present in both texts
    Equal(String),
    /// Only in the new text
    Added(String),
    /// Only in the old text
    Removed(String),
}

impl DiffSpan {
    /// The characters covered by this span.
    pub fn value(&self) -> &str {
        match self {
            DiffSpan::Equal(s) | DiffSpan::Added(s) | DiffSpan::Removed(s) => s,
        }
    }

    /// Length of the span in characters.
    pub fn char_len(&self) -> usize {
        self.value().chars().count()
    }

    /// True for `Added` and `Removed` spans.
    pub fn is_change(&self) -> bool {
        !matches!(self, DiffSpan::Equal(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Equal(char),
    Insert(char),
    Delete(char),
}

/// Diff two texts character by character.
///
/// Identical inputs produce a single `Equal` span (or nothing for two empty
/// strings).
pub fn diff_chars(old: &str, new: &str) -> Vec<DiffSpan> {
    let a: Vec<char> = old.chars().collect();
    let b: Vec<char> = new.chars().collect();

    let prefix = a.iter().zip(&b).take_while(|(x, y)| x == y).count();
    let suffix = a[prefix..]
        .iter()
        .rev()
        .zip(b[prefix..].iter().rev())
        .take_while(|(x, y)| x == y)
        .count();

    let a_mid = &a[prefix..a.len() - suffix];
    let b_mid = &b[prefix..b.len() - suffix];

    let mut spans = Vec::new();
    if prefix > 0 {
        spans.push(DiffSpan::Equal(a[..prefix].iter().collect()));
    }

    match myers(a_mid, b_mid) {
        Some(ops) => coalesce(&ops, &mut spans),
        None => {
            spans.push(DiffSpan::Removed(a_mid.iter().collect()));
            spans.push(DiffSpan::Added(b_mid.iter().collect()));
        }
    }

    if suffix > 0 {
        push_span(&mut spans, DiffSpan::Equal(a[a.len() - suffix..].iter().collect()));
    }
    spans
}

/// Shortest edit script between `a` and `b`, or `None` past `MAX_EDIT_COST`.
fn myers(a: &[char], b: &[char]) -> Option<Vec<Op>> {
    let n = a.len() as isize;
    let m = b.len() as isize;
    let max = (a.len() + b.len()).min(MAX_EDIT_COST) as isize;
    let offset = max + 1;
    let mut v = vec![0isize; 2 * offset as usize + 1];
    // trace[d] holds the diagonals -d..=d as they were before round d
    let mut trace: Vec<Vec<isize>> = Vec::new();

    for d in 0..=max {
        trace.push(v[(offset - d) as usize..=(offset + d) as usize].to_vec());
        let mut k = -d;
        while k <= d {
            let idx = (offset + k) as usize;
            let mut x = if k == -d || (k != d && v[idx - 1] < v[idx + 1]) {
                v[idx + 1]
            } else {
                v[idx - 1] + 1
            };
            let mut y = x - k;
            while x < n && y < m && a[x as usize] == b[y as usize] {
                x += 1;
                y += 1;
            }
            v[idx] = x;
            if x >= n && y >= m {
                return Some(backtrack(a, b, &trace));
            }
            k += 2;
        }
    }
    None
}

fn backtrack(a: &[char], b: &[char], trace: &[Vec<isize>]) -> Vec<Op> {
    let mut x = a.len() as isize;
    let mut y = b.len() as isize;
    let mut ops = Vec::with_capacity(a.len().max(b.len()));

    for (d, v) in trace.iter().enumerate().rev() {
        let d = d as isize;
        // v is indexed from diagonal -d
        let at = |k: isize| v[(k + d) as usize];
        let k = x - y;
        let prev_k = if k == -d || (k != d && at(k - 1) < at(k + 1)) {
            k + 1
        } else {
            k - 1
        };
        let prev_x = if d == 0 { 0 } else { at(prev_k) };
        let prev_y = if d == 0 { 0 } else { prev_x - prev_k };

        while x > prev_x && y > prev_y {
            ops.push(Op::Equal(a[(x - 1) as usize]));
            x -= 1;
            y -= 1;
        }
        if d > 0 {
            if x == prev_x {
                ops.push(Op::Insert(b[(y - 1) as usize]));
            } else {
                ops.push(Op::Delete(a[(x - 1) as usize]));
            }
        }
        x = prev_x;
        y = prev_y;
    }

    ops.reverse();
    ops
}

fn coalesce(ops: &[Op], spans: &mut Vec<DiffSpan>) {
    for op in ops {
        let span = match *op {
            Op::Equal(c) => DiffSpan::Equal(c.to_string()),
            Op::Insert(c) => DiffSpan::Added(c.to_string()),
            Op::Delete(c) => DiffSpan::Removed(c.to_string()),
        };
        push_span(spans, span);
    }
}

/// Append a span, merging it into the previous one when the kinds match.
fn push_span(spans: &mut Vec<DiffSpan>, span: DiffSpan) {
    if span.value().is_empty() {
        return;
    }
    match (spans.last_mut(), span) {
        (Some(DiffSpan::Equal(prev)), DiffSpan::Equal(s))
        | (Some(DiffSpan::Added(prev)), DiffSpan::Added(s))
        | (Some(DiffSpan::Removed(prev)), DiffSpan::Removed(s)) => prev.push_str(&s),
        (_, span) => spans.push(span),
    }
}
