use std::collections::BTreeMap;

use broadside::{
    place_fleet, standard_board, Board, BoardError, ShipId, BOARD_SIZE, FLEET_SIZES,
    TOTAL_SHIP_CELLS,
};
use proptest::prelude::*;
use rand::{rngs::SmallRng, Rng, SeedableRng};

fn groups(board: &Board) -> BTreeMap<ShipId, Vec<(usize, usize)>> {
    let mut groups: BTreeMap<ShipId, Vec<(usize, usize)>> = BTreeMap::new();
    for cell in board.cells().filter(|c| c.has_ship) {
        let id = cell.ship_id.expect("ship cell without id");
        groups.entry(id).or_default().push((cell.row, cell.col));
    }
    groups
}

fn is_straight_run(cells: &[(usize, usize)]) -> bool {
    let same_row = cells.iter().all(|&(r, _)| r == cells[0].0);
    let same_col = cells.iter().all(|&(_, c)| c == cells[0].1);
    // cells come out row-major, so a run is consecutive along its axis
    if same_row {
        cells.windows(2).all(|w| w[1].1 == w[0].1 + 1)
    } else if same_col {
        cells.windows(2).all(|w| w[1].0 == w[0].0 + 1)
    } else {
        false
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn placed_fleet_is_legal(seed in any::<u64>()) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let board = standard_board(&mut rng);

        prop_assert_eq!(board.ship_mask().len(), TOTAL_SHIP_CELLS);
        prop_assert_eq!(board.hit_count(), 0);

        let groups = groups(&board);
        prop_assert_eq!(groups.len(), FLEET_SIZES.len());

        let mut sizes: Vec<usize> = groups.values().map(Vec::len).collect();
        sizes.sort_unstable();
        let mut expected = FLEET_SIZES.to_vec();
        expected.sort_unstable();
        prop_assert_eq!(sizes, expected);

        for (i, (id, cells)) in groups.iter().enumerate() {
            // ids are handed out from 1 in fleet order
            prop_assert_eq!(id.get() as usize, i + 1);
            prop_assert_eq!(cells.len(), FLEET_SIZES[i]);
            prop_assert!(is_straight_run(cells), "ship {} is not a straight run: {:?}", id, cells);
            prop_assert!(cells.iter().all(|&(r, c)| r < BOARD_SIZE && c < BOARD_SIZE));
        }
        prop_assert!(!board.is_fleet_destroyed());
    }

    #[test]
    fn placement_is_reproducible(seed in any::<u64>()) {
        let a = standard_board(&mut SmallRng::seed_from_u64(seed));
        let b = standard_board(&mut SmallRng::seed_from_u64(seed));
        prop_assert_eq!(a, b);
    }

    #[test]
    fn cell_hit_idempotent(seed in any::<u64>(), row in 0..BOARD_SIZE, col in 0..BOARD_SIZE) {
        let board = standard_board(&mut SmallRng::seed_from_u64(seed));
        let once = board.with_cell_hit(row, col).unwrap();
        let twice = once.with_cell_hit(row, col).unwrap();
        prop_assert_eq!(once, twice);
        prop_assert_eq!(once.hit_count(), 1);
    }

    #[test]
    fn fleet_destroyed_iff_every_ship_cell_hit(seed in any::<u64>(), shots in 0..120usize) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut board = standard_board(&mut rng);
        for _ in 0..shots {
            let r = rng.random_range(0..BOARD_SIZE);
            let c = rng.random_range(0..BOARD_SIZE);
            board = board.with_cell_hit(r, c).unwrap();
        }
        let all_hit = board.cells().filter(|c| c.has_ship).all(|c| c.is_hit);
        prop_assert_eq!(board.is_fleet_destroyed(), all_hit);
    }

    #[test]
    fn custom_fleet_sizes_place(
        seed in any::<u64>(),
        sizes in prop::collection::vec(1..=4usize, 0..6),
    ) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let board = place_fleet(&Board::empty(), &sizes, &mut rng).unwrap();
        prop_assert_eq!(board.ship_mask().len(), sizes.iter().sum::<usize>());
        prop_assert_eq!(board.ship_ids().count(), sizes.len());
    }
}

#[test]
fn test_place_fleet_rejects_impossible_sizes() {
    let mut rng = SmallRng::seed_from_u64(7);
    assert_eq!(
        place_fleet(&Board::empty(), &[5, 11], &mut rng).unwrap_err(),
        BoardError::ShipTooLong { length: 11 }
    );
    assert_eq!(
        place_fleet(&Board::empty(), &[0], &mut rng).unwrap_err(),
        BoardError::ShipTooLong { length: 0 }
    );
    let sizes = [10; 11];
    assert_eq!(
        place_fleet(&Board::empty(), &sizes, &mut rng).unwrap_err(),
        BoardError::FleetTooLarge { cells: 110, free: 100 }
    );
}
