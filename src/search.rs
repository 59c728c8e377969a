//! Informed best-first graph search.
//!
//! [`informed_search`] runs A* over any [`SearchProblem`]. Nodes live in an
//! arena and point at their parents by index, so a finished search rebuilds
//! its action sequence without cloning states along the way.

use std::{
  cmp::Reverse,
  collections::{hash_map::Entry, BinaryHeap, HashMap, HashSet},
  hash::Hash,
};

/// Cost of a path or of a single action.
pub type Cost = u32;

/// A problem that [`informed_search`] can solve.
pub trait SearchProblem {
  /// A node of the state space. Equal states are expanded once.
  type State: Clone + Eq + Hash;
  /// A transition between states.
  type Action: Copy;

  /// The state the search starts from.
  fn initial_state(&self) -> Self::State;

  /// Actions applicable in `state`.
  fn actions(&self, state: &Self::State) -> Vec<Self::Action>;

  /// The state reached by applying `action` to `state`.
  fn successor(&self, state: &Self::State, action: Self::Action) -> Self::State;

  /// Cost of taking `action`.
  fn cost(&self, action: Self::Action) -> Cost;

  /// Returns `true` if `state` satisfies the goal.
  fn is_goal(&self, state: &Self::State) -> bool;

  /// A lower bound of the remaining cost from `state` to a goal.
  ///
  /// Must be consistent for the returned solution to be optimal.
  fn heuristic(&self, state: &Self::State) -> Cost;
}

/// A path found by a search.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Solution<A> {
  /// Actions from the initial state to the goal, in order.
  pub actions: Vec<A>,
  /// Sum of the action costs.
  pub cost: Cost,
}

struct Node<S, A> {
  state: S,
  parent: Option<(usize, A)>,
  g: Cost,
}

/// Finds a cheapest path from the initial state of `problem` to a goal
/// state, or `None` if the reachable state space contains no goal.
///
/// Nodes are expanded by increasing `g + h`; nodes with the same estimate
/// are expanded in creation order.
pub fn informed_search<P: SearchProblem>(
  problem: &P,
) -> Option<Solution<P::Action>> {
  let initial = problem.initial_state();
  let mut frontier = BinaryHeap::new();
  let mut best_g: HashMap<P::State, Cost> = HashMap::new();
  let mut explored: HashSet<P::State> = HashSet::new();

  frontier.push(Reverse((problem.heuristic(&initial), 0)));
  best_g.insert(initial.clone(), 0);
  let mut nodes = vec![Node {
    state: initial,
    parent: None,
    g: 0,
  }];

  while let Some(Reverse((_, idx))) = frontier.pop() {
    if explored.contains(&nodes[idx].state) {
      continue;
    }
    if problem.is_goal(&nodes[idx].state) {
      return Some(solution(&nodes, idx));
    }
    let state = nodes[idx].state.clone();
    let g = nodes[idx].g;
    explored.insert(state.clone());

    for action in problem.actions(&state) {
      let next = problem.successor(&state, action);
      if explored.contains(&next) {
        continue;
      }
      let next_g = g + problem.cost(action);
      match best_g.entry(next.clone()) {
        Entry::Occupied(entry) if *entry.get() <= next_g => continue,
        Entry::Occupied(mut entry) => {
          entry.insert(next_g);
        }
        Entry::Vacant(entry) => {
          entry.insert(next_g);
        }
      }
      let f = next_g + problem.heuristic(&next);
      frontier.push(Reverse((f, nodes.len())));
      nodes.push(Node {
        state: next,
        parent: Some((idx, action)),
        g: next_g,
      });
    }
  }
  None
}

fn solution<S, A: Copy>(nodes: &[Node<S, A>], goal: usize) -> Solution<A> {
  let mut actions = vec![];
  let mut idx = goal;
  while let Some((parent, action)) = nodes[idx].parent {
    actions.push(action);
    idx = parent;
  }
  actions.reverse();
  Solution {
    actions,
    cost: nodes[goal].g,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  /// Walks along a number line from `start` to `goal`, with steps of one or
  /// a jump of three that costs two.
  struct Line {
    start: i32,
    goal: i32,
    walls: Vec<i32>,
  }

  impl SearchProblem for Line {
    type State = i32;
    type Action = i32;

    fn initial_state(&self) -> i32 {
      self.start
    }

    fn actions(&self, state: &i32) -> Vec<i32> {
      [-1, 1, 3]
        .into_iter()
        .filter(|step| {
          let next = state + step;
          (-20..=20).contains(&next) && !self.walls.contains(&next)
        })
        .collect()
    }

    fn successor(&self, state: &i32, action: i32) -> i32 {
      state + action
    }

    fn cost(&self, action: i32) -> Cost {
      if action == 3 {
        2
      } else {
        1
      }
    }

    fn is_goal(&self, state: &i32) -> bool {
      *state == self.goal
    }

    fn heuristic(&self, state: &i32) -> Cost {
      // A jump covers three cells for two, a step one cell for one.
      let distance = state.abs_diff(self.goal);
      distance * 2 / 3
    }
  }

  #[test]
  fn test_start_is_goal() {
    let found = informed_search(&Line {
      start: 4,
      goal: 4,
      walls: vec![],
    });
    assert_eq!(
      found,
      Some(Solution {
        actions: vec![],
        cost: 0
      })
    );
  }

  #[test]
  fn test_prefers_cheaper_jumps() {
    let found = informed_search(&Line {
      start: 0,
      goal: 6,
      walls: vec![],
    })
    .unwrap();
    assert_eq!(found.cost, 4);
    assert_eq!(found.actions, vec![3, 3]);
  }

  #[test]
  fn test_walks_around_walls() {
    let found = informed_search(&Line {
      start: 0,
      goal: 4,
      walls: vec![3],
    })
    .unwrap();
    assert_eq!(found.cost, 3);
    assert_eq!(found.actions.iter().sum::<i32>(), 4);
  }

  #[test]
  fn test_unreachable_goal() {
    assert_eq!(
      informed_search(&Line {
        start: 0,
        goal: -5,
        walls: vec![-1],
      }),
      None
    );
  }
}
