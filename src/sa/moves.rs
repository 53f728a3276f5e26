//! Random recoloring moves with undo.

use rand::seq::index;
use rand::Rng;

use super::types::MoveSelection;
use crate::coloring::{Color, ColoringState, NodeId};
use crate::error::{ColoringError, Result};

/// A multi-node recoloring applied in place, with the previous colors kept
/// so it can be rolled back.
///
/// Buffers are reused across calls; one instance serves a whole run.
#[derive(Debug, Default)]
pub struct RecolorMove {
    /// (node, previous color), in application order.
    changes: Vec<(NodeId, Color)>,
    /// Scratch list of eligible nodes.
    pool: Vec<NodeId>,
}

impl RecolorMove {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recolors up to `count` distinct nodes of `state`.
    ///
    /// Candidates are the conflicted nodes or all nodes depending on
    /// `selection`; `count` is clamped to the number of candidates. Each
    /// picked node gets a uniformly random color in `[0, k)` other than
    /// its current one (with `k == 1` it is left as is).
    ///
    /// Every node of `state` must carry a color below `k`.
    pub fn apply<R: Rng>(
        &mut self,
        state: &mut ColoringState,
        k: usize,
        count: usize,
        selection: MoveSelection,
        rng: &mut R,
    ) -> Result<()> {
        self.changes.clear();

        let picked: Vec<NodeId> = match selection {
            MoveSelection::Conflicted => {
                state.conflicted_nodes_into(&mut self.pool);
                let m = count.min(self.pool.len());
                index::sample(rng, self.pool.len(), m)
                    .iter()
                    .map(|i| self.pool[i])
                    .collect()
            }
            MoveSelection::Uniform => {
                let m = count.min(state.len());
                index::sample(rng, state.len(), m).into_vec()
            }
        };

        for id in picked {
            let current = state.color(id)?.ok_or_else(|| {
                ColoringError::invalid(format!("node {id} has no color"))
            })?;
            if let Some(next) = other_color(current, k, rng) {
                state.recolor(id, next)?;
                self.changes.push((id, current));
            }
        }
        Ok(())
    }

    /// Restores the colors changed by the last [`apply`](Self::apply).
    pub fn undo(&mut self, state: &mut ColoringState) -> Result<()> {
        for &(id, previous) in self.changes.iter().rev() {
            state.recolor(id, previous)?;
        }
        self.changes.clear();
        Ok(())
    }

    /// Changes made by the last move: (node, previous color).
    pub fn changes(&self) -> &[(NodeId, Color)] {
        &self.changes
    }

    /// Number of nodes recolored by the last move.
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}

/// Uniform color in `[0, k)` different from `current`, if any exists.
fn other_color<R: Rng>(current: Color, k: usize, rng: &mut R) -> Option<Color> {
    if k < 2 {
        return None;
    }
    let c = rng.random_range(0..k - 1);
    Some(if c >= current { c + 1 } else { c })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    /// Triangle 0-1-2 all colored 0, plus an isolated conflict-free tail 3-4.
    fn triangle_with_tail() -> ColoringState {
        let mut state =
            ColoringState::from_edges(5, &[(0, 1), (1, 2), (0, 2), (3, 4)]).unwrap();
        state
            .assign_colors(&[Some(0), Some(0), Some(0), Some(1), Some(2)])
            .unwrap();
        state
    }

    #[test]
    fn test_conflicted_batch_clamped() {
        let mut state = triangle_with_tail();
        let mut rng = create_rng(1);
        let mut mv = RecolorMove::new();
        mv.apply(&mut state, 3, 10, MoveSelection::Conflicted, &mut rng)
            .unwrap();
        assert_eq!(mv.len(), 3);
        let mut touched: Vec<NodeId> = mv.changes().iter().map(|&(id, _)| id).collect();
        touched.sort_unstable();
        assert_eq!(touched, vec![0, 1, 2]);
    }

    #[test]
    fn test_conflicted_only_touches_conflicted() {
        let mut rng = create_rng(2);
        let mut mv = RecolorMove::new();
        for _ in 0..50 {
            let mut state = triangle_with_tail();
            mv.apply(&mut state, 3, 1, MoveSelection::Conflicted, &mut rng)
                .unwrap();
            assert_eq!(mv.len(), 1);
            assert!(mv.changes()[0].0 < 3);
            assert_eq!(state.color(3).unwrap(), Some(1));
            assert_eq!(state.color(4).unwrap(), Some(2));
        }
    }

    #[test]
    fn test_uniform_batch_clamped_to_node_count() {
        let mut state = triangle_with_tail();
        let mut rng = create_rng(3);
        let mut mv = RecolorMove::new();
        mv.apply(&mut state, 3, 100, MoveSelection::Uniform, &mut rng)
            .unwrap();
        assert_eq!(mv.len(), 5);
    }

    #[test]
    fn test_new_color_differs_and_in_range() {
        let mut rng = create_rng(4);
        let mut mv = RecolorMove::new();
        for _ in 0..100 {
            let mut state = triangle_with_tail();
            let before = state.colors();
            mv.apply(&mut state, 4, 2, MoveSelection::Uniform, &mut rng)
                .unwrap();
            for &(id, previous) in mv.changes() {
                assert_eq!(before[id], Some(previous));
                let now = state.color(id).unwrap().unwrap();
                assert_ne!(now, previous);
                assert!(now < 4);
            }
        }
    }

    #[test]
    fn test_undo_restores_state() {
        let mut rng = create_rng(5);
        let mut mv = RecolorMove::new();
        let original = triangle_with_tail();
        for _ in 0..50 {
            let mut state = original.clone();
            mv.apply(&mut state, 3, 3, MoveSelection::Uniform, &mut rng)
                .unwrap();
            mv.undo(&mut state).unwrap();
            assert_eq!(state, original);
            assert!(mv.is_empty());
        }
    }

    #[test]
    fn test_single_color_leaves_nodes() {
        let mut state = ColoringState::from_edges(2, &[(0, 1)]).unwrap();
        state.assign_colors(&[Some(0), Some(0)]).unwrap();
        let mut rng = create_rng(6);
        let mut mv = RecolorMove::new();
        mv.apply(&mut state, 1, 2, MoveSelection::Conflicted, &mut rng)
            .unwrap();
        assert!(mv.is_empty());
        assert_eq!(state.total_conflicts(), 1);
    }

    #[test]
    fn test_no_conflicts_empty_move() {
        let mut state = ColoringState::from_edges(2, &[(0, 1)]).unwrap();
        state.assign_colors(&[Some(0), Some(1)]).unwrap();
        let mut rng = create_rng(7);
        let mut mv = RecolorMove::new();
        mv.apply(&mut state, 2, 1, MoveSelection::Conflicted, &mut rng)
            .unwrap();
        assert!(mv.is_empty());
    }

    #[test]
    fn test_uncolored_node_rejected() {
        let mut state = ColoringState::from_edges(2, &[(0, 1)]).unwrap();
        let mut rng = create_rng(8);
        let mut mv = RecolorMove::new();
        assert!(matches!(
            mv.apply(&mut state, 2, 1, MoveSelection::Uniform, &mut rng),
            Err(ColoringError::InvalidArgument(_))
        ));
    }
}
