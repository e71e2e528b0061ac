//! Tests for ColumnBalancer geometry and placement rules.

use super::*;

fn balancer(width: u32) -> ColumnBalancer {
    ColumnBalancer::new(&GalleryConfig::default(), width)
}

fn strict_balancer(width: u32) -> ColumnBalancer {
    let config = GalleryConfig {
        strict_order: true,
        ..GalleryConfig::default()
    };
    ColumnBalancer::new(&config, width)
}

fn tops(placements: &[Placement]) -> Vec<(usize, u32)> {
    placements.iter().map(|p| (p.column, p.top)).collect()
}

// ===== column_count =====

#[test]
fn column_count_rounds_to_nearest() {
    assert_eq!(column_count(899, 300, 8), 3);
    assert_eq!(column_count(749, 300, 8), 2);
    assert_eq!(column_count(750, 300, 8), 3);
}

#[test]
fn column_count_never_drops_below_one() {
    assert_eq!(column_count(0, 300, 8), 1);
    assert_eq!(column_count(149, 300, 8), 1);
}

#[test]
fn column_count_respects_cap() {
    assert_eq!(column_count(10_000, 300, 8), 8);
    assert_eq!(column_count(10_000, 300, 3), 3);
}

#[test]
fn geometry_stride_divides_container() {
    let geometry = ColumnGeometry::compute(900, 300, 8);
    assert_eq!(geometry, ColumnGeometry { count: 3, stride: 300 });

    let geometry = ColumnGeometry::compute(1000, 300, 8);
    assert_eq!(geometry.count, 3);
    assert_eq!(geometry.stride, 333);
}

// ===== ColumnState =====

#[test]
fn shortest_breaks_ties_by_lowest_index() {
    let mut state = ColumnState::new(3);
    state.set(0, 50);
    state.set(1, 20);
    state.set(2, 20);
    assert_eq!(state.shortest(), 1);
}

#[test]
fn shortest_of_fresh_state_is_first_column() {
    assert_eq!(ColumnState::new(4).shortest(), 0);
}

// ===== Final pass =====

#[test]
fn relayout_fills_shortest_column() {
    let mut balancer = balancer(900);
    let (placements, total) = balancer.relayout([100, 200, 150, 50]);

    assert_eq!(tops(&placements), vec![(0, 5), (1, 5), (2, 5), (0, 110)]);
    assert_eq!(total, 205);
    assert_eq!(balancer.column_heights(), &[160, 205, 155]);
}

#[test]
fn relayout_applies_gutter_except_on_last_column() {
    let mut balancer = balancer(900);
    let (placements, _) = balancer.relayout([100, 200, 150]);

    let widths: Vec<u32> = placements.iter().map(|p| p.width).collect();
    let lefts: Vec<u32> = placements.iter().map(|p| p.left).collect();
    assert_eq!(widths, vec![295, 295, 300]);
    assert_eq!(lefts, vec![0, 300, 600]);
}

#[test]
fn relayout_marks_everything_visible_with_heights() {
    let mut balancer = balancer(900);
    let (placements, _) = balancer.relayout([10, 20]);

    assert!(placements.iter().all(Placement::is_visible));
    assert_eq!(placements[0].height, Some(10));
    assert_eq!(placements[1].height, Some(20));
}

#[test]
fn relayout_of_nothing_has_zero_height() {
    let mut balancer = balancer(900);
    let (placements, total) = balancer.relayout(std::iter::empty());
    assert!(placements.is_empty());
    assert_eq!(total, 0);
}

#[test]
fn relayout_is_idempotent() {
    let mut balancer = balancer(1200);
    let heights = [320, 80, 410, 95, 260, 333, 12];

    let first = balancer.relayout(heights);
    let second = balancer.relayout(heights);
    assert_eq!(first, second);
}

#[test]
fn ties_prefer_lowest_column_in_final_pass() {
    let mut balancer = balancer(900);
    let (placements, total) = balancer.relayout([300, 100, 100, 100]);

    // Columns 1 and 2 both end at 105; column 1 wins.
    assert_eq!(placements[3].column, 1);
    assert_eq!(placements[3].top, 110);
    assert_eq!(total, 305);
}

#[test]
fn strict_mode_uses_index_modulo_columns() {
    let mut balancer = strict_balancer(900);
    let (placements, total) = balancer.relayout([300, 100, 100, 100]);

    assert_eq!(tops(&placements), vec![(0, 5), (1, 5), (2, 5), (0, 310)]);
    assert_eq!(total, 410);
}

// ===== Provisional pass =====

#[test]
fn place_next_is_hidden_without_height() {
    let mut balancer = balancer(900);
    let placement = balancer.place_next(ItemIndex::new(0));

    assert_eq!(placement.visibility, Visibility::Hidden);
    assert_eq!(placement.height, None);
    assert_eq!(placement.top, 5);
}

#[test]
fn place_next_advances_by_estimated_height() {
    let mut balancer = balancer(900);
    let placements: Vec<Placement> = (0..4)
        .map(|i| balancer.place_next(ItemIndex::new(i)))
        .collect();

    assert_eq!(tops(&placements), vec![(0, 5), (1, 5), (2, 5), (0, 1010)]);
    assert_eq!(balancer.column_heights(), &[2010, 1005, 1005]);
}

#[test]
fn hidden_placement_matches_final_geometry() {
    let mut balancer = balancer(900);
    let hidden: Vec<(u32, u32, u32)> = (0..3)
        .map(|i| balancer.place_next(ItemIndex::new(i)))
        .map(|p| (p.left, p.top, p.width))
        .collect();

    let (placements, _) = balancer.relayout([100, 100, 100]);
    let settled: Vec<(u32, u32, u32)> = placements
        .iter()
        .map(|p| (p.left, p.top, p.width))
        .collect();

    assert_eq!(hidden, settled);
}

#[test]
fn place_next_continues_after_final_pass() {
    let mut balancer = balancer(900);
    balancer.relayout([100, 200, 150]);

    // Column 0 ends at 105, the shortest.
    let next = balancer.place_next(ItemIndex::new(3));
    assert_eq!(next.column, 0);
    assert_eq!(next.top, 110);
}

#[test]
fn reprovision_uses_known_heights_and_stays_hidden() {
    let mut balancer = balancer(900);
    let placements = balancer.reprovision([Some(100), None]);

    assert!(placements.iter().all(|p| !p.is_visible()));
    assert_eq!(placements[0].height, Some(100));
    assert_eq!(placements[1].height, None);
    assert_eq!(balancer.column_heights(), &[105, 1005, 0]);
}

// ===== Resize =====

#[test]
fn narrowing_container_reduces_columns() {
    let mut balancer = balancer(900);
    assert_eq!(balancer.column_count(), 3);

    assert!(balancer.set_container_width(450));
    assert_eq!(balancer.column_count(), 2);

    let (placements, total) = balancer.relayout([100, 200, 150, 50]);
    assert_eq!(tops(&placements), vec![(0, 5), (1, 5), (0, 110), (1, 210)]);
    assert_eq!(placements[0].width, 220);
    assert_eq!(placements[1].width, 225);
    assert_eq!(placements[1].left, 225);
    assert_eq!(total, 260);
}

#[test]
fn same_width_reports_no_geometry_change() {
    let mut balancer = balancer(900);
    assert!(!balancer.set_container_width(900));
    // 910 still rounds to 3 columns of 303px, which is a stride change.
    assert!(balancer.set_container_width(910));
}

#[test]
fn zero_width_container_degenerates_to_one_column() {
    let mut balancer = balancer(0);
    let (placements, total) = balancer.relayout([40, 60]);

    assert_eq!(balancer.column_count(), 1);
    assert_eq!(placements[0].width, 0);
    assert_eq!(tops(&placements), vec![(0, 5), (0, 50)]);
    assert_eq!(total, 110);
}
