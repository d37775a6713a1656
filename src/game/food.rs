use rand::Rng;

use crate::game::player::Cell;

/// Tops up `foods` to `target` cells by rejection sampling: draw a random
/// cell, throw it away if it hits an existing food or an occupied (snake)
/// cell, keep it otherwise. Existing foods are never reshuffled or removed.
///
/// The attempt budget scales with the board area so a nearly-full grid
/// gives up instead of spinning; coming back short of `target` is normal
/// on a crowded board and is not an error.
pub fn replenish(foods: &mut Vec<Cell>, occupied: &[Cell], grid_size: u16, target: usize) {
    let area = grid_size as usize * grid_size as usize;
    let mut attempts = area.max(100);
    let mut rng = rand::thread_rng();

    while foods.len() < target && attempts > 0 {
        attempts -= 1;
        let cell = Cell::new(rng.gen_range(0..grid_size), rng.gen_range(0..grid_size));
        if foods.contains(&cell) || occupied.contains(&cell) {
            continue;
        }
        foods.push(cell);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(pairs: &[(u16, u16)]) -> Vec<Cell> {
        pairs.iter().map(|&(x, y)| Cell::new(x, y)).collect()
    }

    #[test]
    fn fills_an_empty_board_to_target() {
        let mut foods = Vec::new();
        replenish(&mut foods, &[], 20, 7);
        assert_eq!(foods.len(), 7);
    }

    #[test]
    fn never_exceeds_target() {
        let mut foods = cells(&[(0, 0), (1, 1), (2, 2)]);
        replenish(&mut foods, &[], 20, 3);
        assert_eq!(foods.len(), 3);
    }

    #[test]
    fn keeps_existing_foods_in_place() {
        let mut foods = cells(&[(4, 4), (5, 5)]);
        replenish(&mut foods, &[], 20, 7);
        assert_eq!(foods[0], Cell::new(4, 4));
        assert_eq!(foods[1], Cell::new(5, 5));
        assert_eq!(foods.len(), 7);
    }

    #[test]
    fn no_duplicate_food_cells() {
        for _ in 0..50 {
            let mut foods = Vec::new();
            replenish(&mut foods, &[], 4, 7);
            let mut seen = foods.clone();
            seen.sort_by_key(|c| (c.x, c.y));
            seen.dedup();
            assert_eq!(seen.len(), foods.len());
        }
    }

    #[test]
    fn avoids_occupied_cells() {
        let occupied = cells(&[(0, 0), (0, 1), (1, 0), (1, 1)]);
        for _ in 0..50 {
            let mut foods = Vec::new();
            replenish(&mut foods, &occupied, 3, 5);
            for f in &foods {
                assert!(!occupied.contains(f), "food landed on a snake: {f:?}");
            }
        }
    }

    #[test]
    fn crowded_board_yields_fewer_foods() {
        // 2x2 board with three squares taken leaves room for one food.
        let occupied = cells(&[(0, 0), (0, 1), (1, 0)]);
        let mut foods = Vec::new();
        replenish(&mut foods, &occupied, 2, 7);
        assert!(foods.len() <= 1);
    }
}
