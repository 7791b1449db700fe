// Copyright (c) 2025-2026 brdigetrlol. All rights reserved.
// SPDX-License-Identifier: LicenseRef-Icarus-Proprietary
// See LICENSE in the repository root for full license terms.

//! Permutation Groups from Generators
//!
//! The full group is enumerated breadth-first from the identity: every
//! frontier element `p` is extended by `compose(g, p)` for each step `g`,
//! where the step list is the generators followed by their inverses, in
//! generator order, with duplicates removed. Discovery order is therefore a
//! pure function of the generator list.
//!
//! Orbits never materialize the group; they walk the generator action on
//! points directly.

use std::collections::{HashMap, HashSet, VecDeque};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::permutation::{common_degree, Permutation};
use crate::search::SearchOutcome;

/// Interval (in discovered elements) between closure progress logs.
const PROGRESS_INTERVAL: usize = 10_000;

/// A finite permutation group with its elements in BFS discovery order.
#[derive(Debug, Clone)]
pub struct Group {
    degree: usize,
    generators: Vec<Permutation>,
    elements: Vec<Permutation>,
    members: HashSet<Permutation>,
}

impl Group {
    pub fn degree(&self) -> usize {
        self.degree
    }

    pub fn order(&self) -> usize {
        self.elements.len()
    }

    pub fn generators(&self) -> &[Permutation] {
        &self.generators
    }

    /// Elements in discovery order; index 0 is the identity.
    pub fn elements(&self) -> &[Permutation] {
        &self.elements
    }

    pub fn contains(&self, p: &Permutation) -> bool {
        self.members.contains(p)
    }

    /// Closed under left multiplication by every generator.
    ///
    /// Together with containing the identity this makes the finite set a
    /// subgroup, so it is the check run after enumeration.
    pub fn is_closed(&self) -> bool {
        self.members.contains(&Permutation::identity(self.degree))
            && self.elements.iter().all(|p| {
                self.generators
                    .iter()
                    .all(|g| self.members.contains(&Permutation::compose(g, p)))
            })
    }

    /// Compare against an independently known order.
    ///
    /// A mismatch means a wrong generator or a composition-convention bug.
    pub fn verify_order(&self, expected: usize) -> Result<()> {
        if self.order() == expected {
            Ok(())
        } else {
            Err(Error::constraint(format!(
                "group order {} differs from expected {expected}",
                self.order()
            )))
        }
    }

    /// Orbit of `point` under this group's generators.
    pub fn orbit(&self, point: usize) -> Result<Vec<usize>> {
        orbit(point, &self.generators)
    }
}

/// Generators followed by their inverses, first occurrence kept.
fn step_list(generators: &[Permutation]) -> Vec<Permutation> {
    let mut seen = HashSet::new();
    let mut steps = Vec::with_capacity(2 * generators.len());
    for g in generators {
        for s in [g.clone(), g.inverse()] {
            if seen.insert(s.clone()) {
                steps.push(s);
            }
        }
    }
    steps
}

/// Generators with duplicates removed, order kept.
fn dedupe(generators: &[Permutation]) -> Vec<Permutation> {
    let mut seen = HashSet::new();
    generators
        .iter()
        .filter(|g| seen.insert((*g).clone()))
        .cloned()
        .collect()
}

/// Result of a breadth-first walk over the group.
struct Walk {
    elements: Vec<Permutation>,
    members: HashSet<Permutation>,
    hit: Option<usize>,
}

/// BFS over the Cayley graph; stops early once `stop` accepts an element.
fn breadth_first<F>(generators: &[Permutation], budget: usize, mut stop: F) -> Result<Walk>
where
    F: FnMut(&Permutation) -> bool,
{
    let degree = common_degree(generators)?;
    let steps = step_list(generators);
    let identity = Permutation::identity(degree);

    let mut members = HashSet::new();
    let mut elements = Vec::new();
    let mut frontier = VecDeque::new();

    members.insert(identity.clone());
    elements.push(identity.clone());
    if stop(&identity) {
        return Ok(Walk {
            elements,
            members,
            hit: Some(0),
        });
    }
    frontier.push_back(0usize);

    while let Some(idx) = frontier.pop_front() {
        let p = elements[idx].clone();
        for g in &steps {
            let next = Permutation::compose(g, &p);
            if members.contains(&next) {
                continue;
            }
            members.insert(next.clone());
            elements.push(next);
            let pos = elements.len() - 1;
            if elements.len() > budget {
                return Err(Error::ResourceBudgetExceeded {
                    what: "group closure",
                    budget,
                    explored: elements.len(),
                });
            }
            if elements.len() % PROGRESS_INTERVAL == 0 {
                debug!(elements = elements.len(), frontier = frontier.len(), "closure progress");
            }
            if stop(&elements[pos]) {
                return Ok(Walk {
                    elements,
                    members,
                    hit: Some(pos),
                });
            }
            frontier.push_back(pos);
        }
    }

    Ok(Walk {
        elements,
        members,
        hit: None,
    })
}

/// Enumerate the group generated by `generators`.
///
/// Fails with `ResourceBudgetExceeded` once more than `budget` elements have
/// been seen; that outcome means "order unknown", not "no group".
///
/// An empty generator list carries no degree and is rejected as a
/// `ConstraintViolation`. Pass `[Permutation::identity(n)]` for the trivial
/// group on n points.
pub fn closure(generators: &[Permutation], budget: usize) -> Result<Group> {
    let generators = dedupe(generators);
    let walk = breadth_first(&generators, budget, |_| false)?;
    debug!(order = walk.elements.len(), "closure complete");
    Ok(Group {
        degree: common_degree(&generators)?,
        generators,
        elements: walk.elements,
        members: walk.members,
    })
}

/// Orbit of `point` in BFS discovery order.
pub fn orbit(point: usize, generators: &[Permutation]) -> Result<Vec<usize>> {
    let degree = common_degree(generators)?;
    if point >= degree {
        return Err(Error::constraint(format!(
            "point {point} outside 0..{degree}"
        )));
    }
    let mut seen = vec![false; degree];
    let mut orbit = vec![point];
    seen[point] = true;
    let mut head = 0;
    while head < orbit.len() {
        let x = orbit[head];
        head += 1;
        for g in generators {
            let y = g.apply(x);
            if !seen[y] {
                seen[y] = true;
                orbit.push(y);
            }
        }
    }
    Ok(orbit)
}

/// All orbits, each started from its smallest point, in order of that point.
pub fn orbit_partition(generators: &[Permutation]) -> Result<Vec<Vec<usize>>> {
    let degree = common_degree(generators)?;
    let mut assigned = vec![false; degree];
    let mut cells = Vec::new();
    for start in 0..degree {
        if assigned[start] {
            continue;
        }
        let cell = orbit(start, generators)?;
        for &x in &cell {
            assigned[x] = true;
        }
        cells.push(cell);
    }
    Ok(cells)
}

/// Sampling budget for [`find_element`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleBudget {
    /// Number of random words to try.
    pub samples: usize,
    /// Upper bound on the length of each random word.
    pub max_word_length: usize,
}

/// Search random products of generators for an element satisfying `predicate`.
///
/// Deterministic for a fixed `seed`. Running out of samples is `Exhausted`.
pub fn find_element<F>(
    predicate: F,
    generators: &[Permutation],
    budget: SampleBudget,
    seed: u64,
) -> Result<SearchOutcome<Permutation>>
where
    F: Fn(&Permutation) -> bool,
{
    let degree = common_degree(generators)?;
    if budget.max_word_length == 0 {
        return Err(Error::constraint("max_word_length must be positive"));
    }
    let steps = step_list(generators);
    let mut rng = StdRng::seed_from_u64(seed);

    for sample in 0..budget.samples {
        let len = rng.gen_range(1..=budget.max_word_length);
        let mut p = Permutation::identity(degree);
        for _ in 0..len {
            let g = &steps[rng.gen_range(0..steps.len())];
            p = Permutation::compose(g, &p);
        }
        if predicate(&p) {
            debug!(sample, word_length = len, "element found");
            return Ok(SearchOutcome::Found(p));
        }
    }
    Ok(SearchOutcome::Exhausted {
        explored: budget.samples,
    })
}

/// Walk the whole group in BFS order looking for an element.
///
/// `Exhausted` here is a proof of absence; `BudgetExceeded` is not.
pub fn find_element_exhaustive<F>(
    predicate: F,
    generators: &[Permutation],
    budget: usize,
) -> Result<SearchOutcome<Permutation>>
where
    F: Fn(&Permutation) -> bool,
{
    let generators = dedupe(generators);
    match breadth_first(&generators, budget, |p| predicate(p)) {
        Ok(walk) => Ok(match walk.hit {
            Some(pos) => SearchOutcome::Found(walk.elements[pos].clone()),
            None => SearchOutcome::Exhausted {
                explored: walk.elements.len(),
            },
        }),
        Err(Error::ResourceBudgetExceeded {
            budget, explored, ..
        }) => Ok(SearchOutcome::BudgetExceeded { budget, explored }),
        Err(e) => Err(e),
    }
}

/// Outcome of checking that `gᵢ ↦ hᵢ` extends to a homomorphism.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomomorphismReport {
    pub is_homomorphism: bool,
    /// Domain elements visited (the domain order when the check passed).
    pub domain_order: usize,
    /// Distinct images seen.
    pub image_order: usize,
    /// Domain elements mapped to the identity.
    pub kernel_size: usize,
}

/// Walk the diagonal subgroup generated by the pairs `(gᵢ, hᵢ)`.
///
/// The assignment is a well-defined homomorphism iff no domain element is
/// reached with two different images.
pub fn check_homomorphism(
    domain: &[Permutation],
    image: &[Permutation],
    budget: usize,
) -> Result<HomomorphismReport> {
    if domain.len() != image.len() {
        return Err(Error::constraint(format!(
            "{} domain generators but {} images",
            domain.len(),
            image.len()
        )));
    }
    let dd = common_degree(domain)?;
    let id = common_degree(image)?;

    let mut steps = Vec::with_capacity(2 * domain.len());
    for (g, h) in domain.iter().zip(image.iter()) {
        steps.push((g.clone(), h.clone()));
        steps.push((g.inverse(), h.inverse()));
    }

    let mut assigned: HashMap<Permutation, Permutation> = HashMap::new();
    let mut order = Vec::new();
    let start = (Permutation::identity(dd), Permutation::identity(id));
    assigned.insert(start.0.clone(), start.1.clone());
    order.push(start.0);
    let mut head = 0;
    let mut consistent = true;

    'walk: while head < order.len() {
        let p = order[head].clone();
        head += 1;
        let r = assigned[&p].clone();
        for (g, h) in &steps {
            let gp = Permutation::compose(g, &p);
            let hr = Permutation::compose(h, &r);
            match assigned.get(&gp) {
                Some(existing) if *existing != hr => {
                    consistent = false;
                    break 'walk;
                }
                Some(_) => {}
                None => {
                    assigned.insert(gp.clone(), hr);
                    order.push(gp);
                    if order.len() > budget {
                        return Err(Error::ResourceBudgetExceeded {
                            what: "homomorphism check",
                            budget,
                            explored: order.len(),
                        });
                    }
                }
            }
        }
    }

    let images: HashSet<&Permutation> = assigned.values().collect();
    let kernel_size = assigned.values().filter(|r| r.is_identity()).count();
    Ok(HomomorphismReport {
        is_homomorphism: consistent,
        domain_order: assigned.len(),
        image_order: images.len(),
        kernel_size,
    })
}
