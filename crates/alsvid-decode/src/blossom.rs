//! Maximum-weight matching on general graphs.
//!
//! A primal-dual blossom implementation after Galil's formulation
//! ("Efficient algorithms for finding maximum matching in graphs",
//! ACM Computing Surveys, 1986): O(n^3) stages of augmenting-path
//! search with blossom shrinking and dual-variable adjustment. The
//! matching is maximum-cardinality first, maximum-weight among those,
//! which is what the decoder needs: a perfect matching whenever one
//! exists, never a heavy partial one.
//!
//! Vertices are `0..node_count`; each edge `(i, j, w)` is undirected
//! and listed once. The solver is deterministic for a fixed edge order.

/// Absent-vertex / absent-edge sentinel.
const NONE: usize = usize::MAX;

/// Tolerance for tight-edge and exhausted-dual detection; edge weights
/// are reals, so slacks driven to zero by dual updates can land a few
/// ulps away from it.
const SLACK_EPS: f64 = 1e-9;

/// Compute a maximum-cardinality maximum-weight matching.
///
/// Returns, per vertex, the mate it is matched to, or `None` for
/// vertices left unmatched (only possible when the graph admits no
/// perfect matching).
pub(crate) fn maximum_weight_matching(
    node_count: usize,
    edges: &[(usize, usize, f64)],
) -> Vec<Option<usize>> {
    if node_count == 0 || edges.is_empty() {
        return vec![None; node_count];
    }
    let mut solver = Solver::new(node_count, edges);
    solver.run();
    (0..node_count)
        .map(|v| {
            let p = solver.mate[v];
            (p != NONE).then(|| solver.endpoint[p])
        })
        .collect()
}

/// State for one matching computation.
///
/// Indices below `n` are vertices; `n..2n` are blossom slots. Matched
/// edges are stored as endpoint indices: endpoint `2k` is the first
/// vertex of edge `k`, endpoint `2k + 1` the second, and `p ^ 1` is
/// the opposite endpoint of `p`.
struct Solver {
    n: usize,
    edges: Vec<(usize, usize, f64)>,
    /// Vertex sitting at each endpoint.
    endpoint: Vec<usize>,
    /// Per vertex, the remote endpoints of its incident edges.
    neighbend: Vec<Vec<usize>>,
    /// Per vertex, the endpoint of its matched edge, or `NONE`.
    mate: Vec<usize>,
    /// Per vertex/blossom: 0 free, 1 S-vertex, 2 T-vertex (bit 2 is a
    /// transient marker used while scanning for a common ancestor).
    label: Vec<u8>,
    /// Endpoint through which the label was assigned.
    labelend: Vec<usize>,
    /// Top-level blossom containing each vertex.
    inblossom: Vec<usize>,
    blossomparent: Vec<usize>,
    blossomchilds: Vec<Vec<usize>>,
    blossombase: Vec<usize>,
    /// Endpoints of the edges connecting consecutive sub-blossoms.
    blossomendps: Vec<Vec<usize>>,
    /// Least-slack edge towards an S-blossom, per vertex/blossom.
    bestedge: Vec<usize>,
    /// For S-blossoms, least-slack edges to each other S-blossom.
    blossombestedges: Vec<Option<Vec<usize>>>,
    unusedblossoms: Vec<usize>,
    dualvar: Vec<f64>,
    allowedge: Vec<bool>,
    queue: Vec<usize>,
}

impl Solver {
    fn new(n: usize, edges: &[(usize, usize, f64)]) -> Self {
        let maxweight = edges.iter().map(|e| e.2).fold(0.0f64, f64::max);
        let mut endpoint = Vec::with_capacity(2 * edges.len());
        let mut neighbend = vec![Vec::new(); n];
        for (k, &(i, j, _)) in edges.iter().enumerate() {
            endpoint.push(i);
            endpoint.push(j);
            neighbend[i].push(2 * k + 1);
            neighbend[j].push(2 * k);
        }
        let mut dualvar = vec![maxweight; n];
        dualvar.resize(2 * n, 0.0);
        let mut blossombase: Vec<usize> = (0..n).collect();
        blossombase.resize(2 * n, NONE);
        Solver {
            n,
            edges: edges.to_vec(),
            endpoint,
            neighbend,
            mate: vec![NONE; n],
            label: vec![0; 2 * n],
            labelend: vec![NONE; 2 * n],
            inblossom: (0..n).collect(),
            blossomparent: vec![NONE; 2 * n],
            blossomchilds: vec![Vec::new(); 2 * n],
            blossombase,
            blossomendps: vec![Vec::new(); 2 * n],
            bestedge: vec![NONE; 2 * n],
            blossombestedges: vec![None; 2 * n],
            unusedblossoms: (n..2 * n).collect(),
            dualvar,
            allowedge: vec![false; edges.len()],
            queue: Vec::new(),
        }
    }

    /// Slack of edge `k` under the current duals; tight (zero) edges
    /// may enter the matching.
    fn slack(&self, k: usize) -> f64 {
        let (i, j, wt) = self.edges[k];
        self.dualvar[i] + self.dualvar[j] - 2.0 * wt
    }

    /// All vertices contained in (possibly nested) blossom `b`.
    fn leaves(&self, b: usize) -> Vec<usize> {
        fn collect(s: &Solver, b: usize, out: &mut Vec<usize>) {
            if b < s.n {
                out.push(b);
            } else {
                for &child in &s.blossomchilds[b] {
                    collect(s, child, out);
                }
            }
        }
        let mut out = Vec::new();
        collect(self, b, &mut out);
        out
    }

    /// Python-style wraparound indexing for the signed walk along a
    /// blossom's child cycle.
    fn wrap(len: isize, j: isize) -> usize {
        (((j % len) + len) % len) as usize
    }

    /// Label vertex `w` (and its top-level blossom) as S (`t == 1`) or
    /// T (`t == 2`), reached through endpoint `p`. New S-vertices are
    /// queued for scanning; a new T-blossom immediately labels its
    /// mate as S.
    fn assign_label(&mut self, w: usize, t: u8, p: usize) {
        let b = self.inblossom[w];
        self.label[w] = t;
        self.label[b] = t;
        self.labelend[w] = p;
        self.labelend[b] = p;
        self.bestedge[w] = NONE;
        self.bestedge[b] = NONE;
        if t == 1 {
            let leaves = self.leaves(b);
            self.queue.extend(leaves);
        } else if t == 2 {
            let base = self.blossombase[b];
            let mp = self.mate[base];
            let mate_vertex = self.endpoint[mp];
            self.assign_label(mate_vertex, 1, mp ^ 1);
        }
    }

    /// Trace back from both ends of a tight S-S edge; returns the base
    /// of the lowest common blossom ancestor, or `NONE` when the two
    /// trees are rooted at different free vertices (an augmenting
    /// path).
    fn scan_blossom(&mut self, v: usize, w: usize) -> usize {
        let mut v = v;
        let mut w = w;
        let mut path = Vec::new();
        let mut base = NONE;
        while v != NONE || w != NONE {
            let mut b = self.inblossom[v];
            if self.label[b] & 4 != 0 {
                base = self.blossombase[b];
                break;
            }
            path.push(b);
            self.label[b] = 5;
            if self.labelend[b] == NONE {
                v = NONE;
            } else {
                v = self.endpoint[self.labelend[b]];
                b = self.inblossom[v];
                v = self.endpoint[self.labelend[b]];
            }
            if w != NONE {
                std::mem::swap(&mut v, &mut w);
            }
        }
        for b in path {
            self.label[b] = 1;
        }
        base
    }

    /// Shrink the odd cycle closed by edge `k` (whose trees meet at
    /// `base`) into a new S-blossom.
    fn add_blossom(&mut self, base: usize, k: usize) {
        let (mut v, mut w, _) = self.edges[k];
        let bb = self.inblossom[base];
        let mut bv = self.inblossom[v];
        let mut bw = self.inblossom[w];
        let b = self.unusedblossoms.pop().expect("blossom slots exhausted");
        self.blossombase[b] = base;
        self.blossomparent[b] = NONE;
        self.blossomparent[bb] = b;

        // Walk both tree branches down to the common base, collecting
        // the cycle's sub-blossoms and connecting endpoints.
        let mut path = Vec::new();
        let mut endps = Vec::new();
        while bv != bb {
            self.blossomparent[bv] = b;
            path.push(bv);
            endps.push(self.labelend[bv]);
            v = self.endpoint[self.labelend[bv]];
            bv = self.inblossom[v];
        }
        path.push(bb);
        path.reverse();
        endps.reverse();
        endps.push(2 * k);
        while bw != bb {
            self.blossomparent[bw] = b;
            path.push(bw);
            endps.push(self.labelend[bw] ^ 1);
            w = self.endpoint[self.labelend[bw]];
            bw = self.inblossom[w];
        }

        self.label[b] = 1;
        self.labelend[b] = self.labelend[bb];
        self.dualvar[b] = 0.0;
        for leaf in self.leaves(b) {
            if self.label[self.inblossom[leaf]] == 2 {
                // Former T-vertices become S-vertices; scan them.
                self.queue.push(leaf);
            }
            self.inblossom[leaf] = b;
        }

        // Merge the constituents' least-slack edge lists.
        let mut bestedgeto = vec![NONE; 2 * self.n];
        for &sub in &path {
            let nblists: Vec<Vec<usize>> = match &self.blossombestedges[sub] {
                Some(list) => vec![list.clone()],
                None => self
                    .leaves(sub)
                    .into_iter()
                    .map(|leaf| self.neighbend[leaf].iter().map(|&p| p / 2).collect())
                    .collect(),
            };
            for nblist in nblists {
                for e in nblist {
                    let (i, j, _) = self.edges[e];
                    let bj = if self.inblossom[j] == b {
                        self.inblossom[i]
                    } else {
                        self.inblossom[j]
                    };
                    if bj != b
                        && self.label[bj] == 1
                        && (bestedgeto[bj] == NONE || self.slack(e) < self.slack(bestedgeto[bj]))
                    {
                        bestedgeto[bj] = e;
                    }
                }
            }
            self.blossombestedges[sub] = None;
            self.bestedge[sub] = NONE;
        }
        let best: Vec<usize> = bestedgeto.into_iter().filter(|&e| e != NONE).collect();
        self.bestedge[b] = NONE;
        for &e in &best {
            if self.bestedge[b] == NONE || self.slack(e) < self.slack(self.bestedge[b]) {
                self.bestedge[b] = e;
            }
        }
        self.blossombestedges[b] = Some(best);
        self.blossomchilds[b] = path;
        self.blossomendps[b] = endps;
    }

    /// Undo a blossom whose dual reached zero, either mid-stage (a
    /// T-blossom, whose interior must be relabeled) or at stage end.
    fn expand_blossom(&mut self, b: usize, endstage: bool) {
        let childs = self.blossomchilds[b].clone();
        for &s in &childs {
            self.blossomparent[s] = NONE;
            if s < self.n {
                self.inblossom[s] = s;
            } else if endstage && self.dualvar[s].abs() <= SLACK_EPS {
                self.expand_blossom(s, endstage);
            } else {
                for leaf in self.leaves(s) {
                    self.inblossom[leaf] = s;
                }
            }
        }

        if !endstage && self.label[b] == 2 {
            // The expanding T-blossom lies on an alternating path.
            // Relabel the even-length side of the cycle between the
            // entry child and the base, and leave the other side to be
            // relabeled on demand.
            let entrychild = self.inblossom[self.endpoint[self.labelend[b] ^ 1]];
            let len = self.blossomchilds[b].len() as isize;
            let pos = self
                .blossomchilds[b]
                .iter()
                .position(|&c| c == entrychild)
                .expect("entry child lost") as isize;
            let mut j = pos;
            let (jstep, endptrick): (isize, usize) = if pos & 1 != 0 {
                j -= len;
                (1, 0)
            } else {
                (-1, 1)
            };
            let mut p = self.labelend[b];
            while j != 0 {
                self.label[self.endpoint[p ^ 1]] = 0;
                let q = self.blossomendps[b][Self::wrap(len, j - endptrick as isize)] ^ endptrick;
                self.label[self.endpoint[q ^ 1]] = 0;
                let relabel = self.endpoint[p ^ 1];
                self.assign_label(relabel, 2, p);
                self.allowedge[q / 2] = true;
                j += jstep;
                p = self.blossomendps[b][Self::wrap(len, j - endptrick as isize)] ^ endptrick;
                self.allowedge[p / 2] = true;
                j += jstep;
            }
            // The base keeps its T label without stepping to its mate.
            let bv = self.blossomchilds[b][0];
            let entry = self.endpoint[p ^ 1];
            self.label[entry] = 2;
            self.label[bv] = 2;
            self.labelend[entry] = p;
            self.labelend[bv] = p;
            self.bestedge[bv] = NONE;
            // The remaining sub-blossoms sit off the path; clear any
            // stale labels so they can be relabeled from scratch.
            j += jstep;
            while self.blossomchilds[b][Self::wrap(len, j)] != entrychild {
                let sub = self.blossomchilds[b][Self::wrap(len, j)];
                if self.label[sub] == 1 {
                    j += jstep;
                    continue;
                }
                let mut labeled = NONE;
                for leaf in self.leaves(sub) {
                    if self.label[leaf] != 0 {
                        labeled = leaf;
                        break;
                    }
                }
                if labeled != NONE {
                    self.label[labeled] = 0;
                    let base = self.blossombase[sub];
                    let mate_vertex = self.endpoint[self.mate[base]];
                    self.label[mate_vertex] = 0;
                    let le = self.labelend[labeled];
                    self.assign_label(labeled, 2, le);
                }
                j += jstep;
            }
        }

        self.label[b] = 0;
        self.labelend[b] = NONE;
        self.blossomchilds[b].clear();
        self.blossomendps[b].clear();
        self.blossombase[b] = NONE;
        self.blossombestedges[b] = None;
        self.bestedge[b] = NONE;
        self.unusedblossoms.push(b);
    }

    /// Swap matched and unmatched edges around blossom `b` so that its
    /// base becomes vertex `v`.
    fn augment_blossom(&mut self, b: usize, v: usize) {
        let mut t = v;
        while self.blossomparent[t] != b {
            t = self.blossomparent[t];
        }
        if t >= self.n {
            self.augment_blossom(t, v);
        }
        let len = self.blossomchilds[b].len() as isize;
        let pos = self
            .blossomchilds[b]
            .iter()
            .position(|&c| c == t)
            .expect("sub-blossom lost") as isize;
        let mut j = pos;
        let (jstep, endptrick): (isize, usize) = if pos & 1 != 0 {
            j -= len;
            (1, 0)
        } else {
            (-1, 1)
        };
        while j != 0 {
            j += jstep;
            let sub = self.blossomchilds[b][Self::wrap(len, j)];
            let p = self.blossomendps[b][Self::wrap(len, j - endptrick as isize)] ^ endptrick;
            if sub >= self.n {
                let ep = self.endpoint[p];
                self.augment_blossom(sub, ep);
            }
            j += jstep;
            let sub = self.blossomchilds[b][Self::wrap(len, j)];
            if sub >= self.n {
                let ep = self.endpoint[p ^ 1];
                self.augment_blossom(sub, ep);
            }
            self.mate[self.endpoint[p]] = p ^ 1;
            self.mate[self.endpoint[p ^ 1]] = p;
        }
        self.blossomchilds[b].rotate_left(pos as usize);
        self.blossomendps[b].rotate_left(pos as usize);
        self.blossombase[b] = self.blossombase[self.blossomchilds[b][0]];
    }

    /// Flip the matching along the augmenting path through tight edge
    /// `k`, from both its endpoints up to the tree roots.
    fn augment_matching(&mut self, k: usize) {
        let (v, w, _) = self.edges[k];
        for (mut s, mut p) in [(v, 2 * k + 1), (w, 2 * k)] {
            loop {
                let bs = self.inblossom[s];
                if bs >= self.n {
                    self.augment_blossom(bs, s);
                }
                self.mate[s] = p;
                if self.labelend[bs] == NONE {
                    // Reached a free tree root.
                    break;
                }
                let t = self.endpoint[self.labelend[bs]];
                let bt = self.inblossom[t];
                let next_s = self.endpoint[self.labelend[bt]];
                let j = self.endpoint[self.labelend[bt] ^ 1];
                if bt >= self.n {
                    self.augment_blossom(bt, j);
                }
                self.mate[j] = self.labelend[bt];
                p = self.labelend[bt] ^ 1;
                s = next_s;
            }
        }
    }

    fn run(&mut self) {
        for _ in 0..self.n {
            // New stage: forget labels and per-stage edge bookkeeping,
            // then root an alternating tree at every free vertex.
            self.label.fill(0);
            self.bestedge.fill(NONE);
            for best in &mut self.blossombestedges[self.n..] {
                *best = None;
            }
            self.allowedge.fill(false);
            self.queue.clear();
            for v in 0..self.n {
                if self.mate[v] == NONE && self.label[self.inblossom[v]] == 0 {
                    self.assign_label(v, 1, NONE);
                }
            }

            let mut augmented = false;
            loop {
                while !augmented {
                    let Some(v) = self.queue.pop() else { break };
                    let incident = self.neighbend[v].clone();
                    for p in incident {
                        let k = p / 2;
                        let w = self.endpoint[p];
                        if self.inblossom[v] == self.inblossom[w] {
                            continue;
                        }
                        let mut kslack = 0.0;
                        if !self.allowedge[k] {
                            kslack = self.slack(k);
                            if kslack <= SLACK_EPS {
                                self.allowedge[k] = true;
                            }
                        }
                        if self.allowedge[k] {
                            let bw = self.inblossom[w];
                            if self.label[bw] == 0 {
                                self.assign_label(w, 2, p ^ 1);
                            } else if self.label[bw] == 1 {
                                let base = self.scan_blossom(v, w);
                                if base != NONE {
                                    self.add_blossom(base, k);
                                } else {
                                    self.augment_matching(k);
                                    augmented = true;
                                    break;
                                }
                            } else if self.label[w] == 0 {
                                // Inside a T-blossom but not yet
                                // individually reached.
                                self.label[w] = 2;
                                self.labelend[w] = p ^ 1;
                            }
                        } else if self.label[self.inblossom[w]] == 1 {
                            let bv = self.inblossom[v];
                            if self.bestedge[bv] == NONE
                                || kslack < self.slack(self.bestedge[bv])
                            {
                                self.bestedge[bv] = k;
                            }
                        } else if self.label[w] == 0
                            && (self.bestedge[w] == NONE
                                || kslack < self.slack(self.bestedge[w]))
                        {
                            self.bestedge[w] = k;
                        }
                    }
                }
                if augmented {
                    break;
                }

                // No augmenting path under the current duals; find the
                // smallest useful adjustment. Vertex duals may go
                // negative: cardinality outranks weight.
                let mut deltatype = 0u8;
                let mut delta = 0.0f64;
                let mut deltaedge = NONE;
                let mut deltablossom = NONE;
                for v in 0..self.n {
                    if self.label[self.inblossom[v]] == 0 && self.bestedge[v] != NONE {
                        let d = self.slack(self.bestedge[v]);
                        if deltatype == 0 || d < delta {
                            delta = d;
                            deltatype = 2;
                            deltaedge = self.bestedge[v];
                        }
                    }
                }
                for b in 0..2 * self.n {
                    if self.blossomparent[b] == NONE
                        && self.label[b] == 1
                        && self.bestedge[b] != NONE
                    {
                        let d = self.slack(self.bestedge[b]) / 2.0;
                        if deltatype == 0 || d < delta {
                            delta = d;
                            deltatype = 3;
                            deltaedge = self.bestedge[b];
                        }
                    }
                }
                for b in self.n..2 * self.n {
                    if self.blossombase[b] != NONE
                        && self.blossomparent[b] == NONE
                        && self.label[b] == 2
                        && (deltatype == 0 || self.dualvar[b] < delta)
                    {
                        delta = self.dualvar[b];
                        deltatype = 4;
                        deltablossom = b;
                    }
                }
                if deltatype == 0 {
                    // Optimum reached; clamp so free-vertex duals stay
                    // non-negative.
                    deltatype = 1;
                    delta = self.dualvar[..self.n]
                        .iter()
                        .fold(f64::INFINITY, |a, &d| a.min(d))
                        .max(0.0);
                }

                for v in 0..self.n {
                    match self.label[self.inblossom[v]] {
                        1 => self.dualvar[v] -= delta,
                        2 => self.dualvar[v] += delta,
                        _ => {}
                    }
                }
                for b in self.n..2 * self.n {
                    if self.blossombase[b] != NONE && self.blossomparent[b] == NONE {
                        match self.label[b] {
                            1 => self.dualvar[b] += delta,
                            2 => self.dualvar[b] -= delta,
                            _ => {}
                        }
                    }
                }

                match deltatype {
                    1 => break,
                    2 => {
                        self.allowedge[deltaedge] = true;
                        let (i, j, _) = self.edges[deltaedge];
                        let next = if self.label[self.inblossom[i]] == 0 { j } else { i };
                        self.queue.push(next);
                    }
                    3 => {
                        self.allowedge[deltaedge] = true;
                        let (i, _, _) = self.edges[deltaedge];
                        self.queue.push(i);
                    }
                    _ => self.expand_blossom(deltablossom, false),
                }
            }

            if !augmented {
                break;
            }
            // Expand S-blossoms whose dual dropped to zero; their
            // structure carries no more information.
            for b in self.n..2 * self.n {
                if self.blossomparent[b] == NONE
                    && self.blossombase[b] != NONE
                    && self.label[b] == 1
                    && self.dualvar[b].abs() <= SLACK_EPS
                {
                    self.expand_blossom(b, true);
                }
            }
        }
    }
}
