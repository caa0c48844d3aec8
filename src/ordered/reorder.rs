use super::store::Sequenced;

/// Direction for the up/down reorder buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// Rewrite every position to `0..n-1` in vector order.
pub fn renumber<T: Sequenced>(items: &mut [T]) {
    for (idx, item) in items.iter_mut().enumerate() {
        item.set_position(idx);
    }
}

/// Relocate the entry with `source_key` to the slot currently held by
/// `target_key` (drag-and-drop semantics), then renumber.
///
/// A move onto itself and any unknown key are no-ops, not errors.
pub fn move_to_key<T: Sequenced>(items: &mut Vec<T>, source_key: &str, target_key: &str) {
    if source_key == target_key {
        return;
    }
    let src = items.iter().position(|i| i.key() == source_key);
    let dst = items.iter().position(|i| i.key() == target_key);
    let (Some(src), Some(dst)) = (src, dst) else {
        return;
    };
    let moved = items.remove(src);
    items.insert(dst, moved);
    renumber(items);
}

/// Move the entry at `index` one slot up or down, then renumber.
///
/// Out-of-bounds indices and moves past either end are no-ops.
pub fn move_step<T: Sequenced>(items: &mut [T], index: usize, direction: Direction) {
    if index >= items.len() {
        return;
    }
    match direction {
        Direction::Up if index > 0 => items.swap(index, index - 1),
        Direction::Down if index + 1 < items.len() => items.swap(index, index + 1),
        _ => return,
    }
    renumber(items);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Step {
        key: String,
        position: usize,
    }

    impl Step {
        fn new(key: &str, position: usize) -> Self {
            Self {
                key: key.to_string(),
                position,
            }
        }
    }

    impl Sequenced for Step {
        fn key(&self) -> &str {
            &self.key
        }
        fn position(&self) -> usize {
            self.position
        }
        fn set_position(&mut self, position: usize) {
            self.position = position;
        }
    }

    fn abc() -> Vec<Step> {
        vec![Step::new("a", 0), Step::new("b", 1), Step::new("c", 2)]
    }

    fn keys(items: &[Step]) -> Vec<&str> {
        items.iter().map(|s| s.key.as_str()).collect()
    }

    fn positions(items: &[Step]) -> Vec<usize> {
        items.iter().map(|s| s.position).collect()
    }

    #[test]
    fn test_move_last_to_front() {
        // [A@0, B@1, C@2], move C onto A's slot -> [C@0, A@1, B@2]
        let mut items = abc();
        move_to_key(&mut items, "c", "a");
        assert_eq!(keys(&items), vec!["c", "a", "b"]);
        assert_eq!(positions(&items), vec![0, 1, 2]);
    }

    #[test]
    fn test_move_front_toward_back() {
        let mut items = abc();
        move_to_key(&mut items, "a", "c");
        assert_eq!(keys(&items), vec!["b", "c", "a"]);
        assert_eq!(positions(&items), vec![0, 1, 2]);
    }

    #[test]
    fn test_move_onto_itself_is_noop() {
        let mut items = abc();
        let before = items.clone();
        move_to_key(&mut items, "b", "b");
        assert_eq!(items, before);
    }

    #[test]
    fn test_unknown_source_is_noop() {
        let mut items = abc();
        let before = items.clone();
        move_to_key(&mut items, "zzz", "a");
        assert_eq!(items, before);
    }

    #[test]
    fn test_unknown_target_is_noop() {
        let mut items = abc();
        let before = items.clone();
        move_to_key(&mut items, "a", "zzz");
        assert_eq!(items, before);
    }

    #[test]
    fn test_positions_always_contiguous_after_move() {
        let mut items = vec![
            Step::new("a", 4),
            Step::new("b", 9),
            Step::new("c", 1),
            Step::new("d", 6),
        ];
        move_to_key(&mut items, "d", "b");
        assert_eq!(positions(&items), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_move_step_up() {
        let mut items = abc();
        move_step(&mut items, 2, Direction::Up);
        assert_eq!(keys(&items), vec!["a", "c", "b"]);
        assert_eq!(positions(&items), vec![0, 1, 2]);
    }

    #[test]
    fn test_move_step_down() {
        let mut items = abc();
        move_step(&mut items, 0, Direction::Down);
        assert_eq!(keys(&items), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_move_step_past_edges_is_noop() {
        let mut items = abc();
        let before = items.clone();
        move_step(&mut items, 0, Direction::Up);
        assert_eq!(items, before);
        move_step(&mut items, 2, Direction::Down);
        assert_eq!(items, before);
    }

    #[test]
    fn test_move_step_out_of_bounds_is_noop() {
        let mut items = abc();
        let before = items.clone();
        move_step(&mut items, 99, Direction::Up);
        assert_eq!(items, before);
    }

    #[test]
    fn test_renumber_is_idempotent() {
        let mut items = abc();
        renumber(&mut items);
        let once = items.clone();
        renumber(&mut items);
        assert_eq!(items, once);
    }
}
