use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::rc::Rc;

use crate::decoder::core::Attachment;
use super::heuristic::{Heuristic, CostTable};
use super::rfc::Rfc;


/// A legal way of attaching one EDU.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Step {
    pub(crate) site: usize,
    pub(crate) attachment: Attachment,
    pub(crate) cost: f64,
    pub(crate) coordinating: bool,
}


/// One search problem: the EDUs of a document in processing order
/// and the steps available to each of them.
#[derive(Debug, Clone)]
pub(crate) struct Problem {
    pub(crate) root: usize,
    pub(crate) steps: Vec<Vec<Step>>,
    pub(crate) rfc: Rfc,
    pub(crate) heuristic: Heuristic,
    pub(crate) table: CostTable,
}


// The chosen attachments of a state, shared with its ancestors.
struct Path {
    attachment: Attachment,
    prev: Option<Rc<Path>>,
}


struct State {
    next: usize,
    frontier: Rc<Vec<usize>>,
    path: Option<Rc<Path>>,
    cost: f64,
}


impl State {
    fn attachments(&self) -> Vec<Attachment> {
        let mut attachments = Vec::with_capacity(self.next);
        let mut node = self.path.as_ref();
        while let Some(path) = node {
            attachments.push(path.attachment);
            node = path.prev.as_ref();
        }
        attachments.reverse();
        attachments
    }
}


struct Entry {
    priority: f64,
    seq: u64,
    state: State,
}


impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}


impl Eq for Entry {}


impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}


impl Ord for Entry {
    // `BinaryHeap` pops the greatest entry:
    // lowest priority first, then first inserted.
    fn cmp(&self, other: &Self) -> Ordering {
        other.priority.total_cmp(&self.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}


/// A goal state reached by the search.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Goal {
    pub(crate) cost: f64,
    pub(crate) attachments: Vec<Attachment>,
}


/// Best-first search for at most `k` goals,
/// in the order they leave the queue.
pub(crate) fn search(problem: &Problem, k: usize) -> Vec<Goal> {
    let n_steps = problem.steps.len();
    let mut goals = Vec::new();
    let mut queue = BinaryHeap::new();
    let mut seq = 0u64;

    let start = State {
        next: 0,
        frontier: Rc::new(vec![problem.root]),
        path: None,
        cost: 0f64,
    };
    queue.push(Entry {
        priority: problem.heuristic.estimate(&problem.table, 0),
        seq,
        state: start,
    });

    while let Some(Entry { state, .. }) = queue.pop() {
        if state.next == n_steps {
            goals.push(Goal { cost: state.cost, attachments: state.attachments() });
            if goals.len() == k {
                break;
            }
            continue;
        }

        let h = problem.heuristic.estimate(&problem.table, state.next + 1);
        let node_steps = &problem.steps[state.next];
        for step in node_steps {
            let frontier = match problem.rfc {
                Rfc::None => Rc::clone(&state.frontier),
                rfc => {
                    let Some(pos) = state.frontier.iter().position(|&s| s == step.site)
                    else {
                        continue;
                    };
                    // EDUs are processed in document order after the root.
                    let node = problem.root + 1 + state.next;
                    Rc::new(rfc.advance(&state.frontier, pos, node, step.coordinating))
                },
            };
            let path = Rc::new(Path {
                attachment: step.attachment,
                prev: state.path.clone(),
            });
            let cost = state.cost + step.cost;
            seq += 1;
            queue.push(Entry {
                priority: cost + h,
                seq,
                state: State {
                    next: state.next + 1,
                    frontier,
                    path: Some(path),
                    cost,
                },
            });
        }
    }
    goals
}


#[cfg(test)]
mod tests {
    use super::*;

    fn step(site: usize, index: usize, cost: f64) -> Step {
        Step {
            site,
            attachment: Attachment::new(index, 0),
            cost,
            coordinating: false,
        }
    }

    fn problem(steps: Vec<Vec<Step>>, rfc: Rfc) -> Problem {
        let costs = steps.iter()
            .map(|s| s.iter().map(|s| s.cost).collect())
            .collect::<Vec<Vec<f64>>>();
        Problem {
            root: 0,
            steps,
            rfc,
            heuristic: Heuristic::Zero,
            table: CostTable::new(&costs),
        }
    }

    #[test]
    fn test_cheapest_path() {
        let p = problem(vec![
            vec![step(0, 0, 1.0)],
            vec![step(0, 1, 2.0), step(1, 2, 0.5)],
        ], Rfc::None);
        let goals = search(&p, 1);
        assert_eq!(goals.len(), 1);
        assert_eq!(goals[0].cost, 1.5);
        let indices = goals[0].attachments.iter().map(|a| a.index).collect::<Vec<_>>();
        assert_eq!(indices, vec![0, 2]);
    }

    #[test]
    fn test_nbest_order() {
        let p = problem(vec![
            vec![step(0, 0, 1.0)],
            vec![step(0, 1, 2.0), step(1, 2, 0.5)],
        ], Rfc::None);
        let goals = search(&p, 5);
        assert_eq!(goals.len(), 2);
        assert!(goals[0].cost <= goals[1].cost);
    }

    #[test]
    fn test_frontier_blocks_sites() {
        // Node 2 attaches to node 1 as coordination,
        // so node 1 leaves the frontier.
        let mut coord = step(1, 1, 0.0);
        coord.coordinating = true;
        let p = problem(vec![
            vec![step(0, 0, 0.0)],
            vec![coord],
            vec![step(1, 2, 0.0)],
        ], Rfc::Full);
        assert!(search(&p, 1).is_empty());
    }
}
