use eframe::egui::{pos2, vec2, Rect};

// ---------------------------------------------------------------------------
// Squarified treemap layout
// ---------------------------------------------------------------------------

/// Split `bounds` into one tile per value, tile area proportional to value.
///
/// Values should be sorted descending for the best aspect ratios. Rows are
/// grown while that keeps the worst aspect ratio from getting worse, then laid
/// along the shorter side of the remaining space.
pub fn squarify(values: &[f64], bounds: Rect) -> Vec<Rect> {
    let total: f64 = values.iter().sum();
    if values.is_empty() || total <= 0.0 || bounds.area() <= 0.0 {
        return vec![Rect::from_min_size(bounds.min, vec2(0.0, 0.0)); values.len()];
    }

    let scale = bounds.area() / total as f32;
    let areas: Vec<f32> = values.iter().map(|&v| v.max(0.0) as f32 * scale).collect();

    let mut tiles = Vec::with_capacity(areas.len());
    let mut free = bounds;
    let mut start = 0;

    while start < areas.len() {
        let side = free.width().min(free.height());
        let mut end = start + 1;
        while end < areas.len()
            && worst_ratio(&areas[start..=end], side) <= worst_ratio(&areas[start..end], side)
        {
            end += 1;
        }

        let row = &areas[start..end];
        let row_area: f32 = row.iter().sum();

        if free.width() >= free.height() {
            // Column on the left edge.
            let width = thickness(row_area, free.height());
            let mut y = free.top();
            for &a in row {
                let h = thickness(a, width);
                tiles.push(Rect::from_min_size(pos2(free.left(), y), vec2(width, h)));
                y += h;
            }
            free = Rect::from_min_max(pos2(free.left() + width, free.top()), free.max);
        } else {
            // Row along the top edge.
            let height = thickness(row_area, free.width());
            let mut x = free.left();
            for &a in row {
                let w = thickness(a, height);
                tiles.push(Rect::from_min_size(pos2(x, free.top()), vec2(w, height)));
                x += w;
            }
            free = Rect::from_min_max(pos2(free.left(), free.top() + height), free.max);
        }

        start = end;
    }

    tiles
}

/// Extent of a strip of `area` laid against a side of length `side`.
fn thickness(area: f32, side: f32) -> f32 {
    if side > 0.0 {
        area / side
    } else {
        0.0
    }
}

/// Worst aspect ratio among `row` when laid against a side of length `side`.
fn worst_ratio(row: &[f32], side: f32) -> f32 {
    let sum: f32 = row.iter().sum();
    if sum <= 0.0 || side <= 0.0 {
        return f32::INFINITY;
    }
    let max = row.iter().copied().fold(f32::MIN, f32::max);
    let min = row.iter().copied().fold(f32::MAX, f32::min);
    let side2 = side * side;
    let sum2 = sum * sum;
    (side2 * max / sum2).max(sum2 / (side2 * min))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> Rect {
        Rect::from_min_size(pos2(10.0, 20.0), vec2(600.0, 400.0))
    }

    #[test]
    fn tiles_cover_bounds_proportionally() {
        let values = [6.0, 6.0, 4.0, 3.0, 2.0, 2.0, 1.0];
        let tiles = squarify(&values, bounds());
        assert_eq!(tiles.len(), values.len());

        let total_area: f32 = tiles.iter().map(|r| r.area()).sum();
        assert!((total_area - bounds().area()).abs() < 1.0);

        let total: f64 = values.iter().sum();
        for (tile, v) in tiles.iter().zip(values) {
            let expected = bounds().area() * (v / total) as f32;
            assert!((tile.area() - expected).abs() < 1.0, "{tile:?} vs {expected}");
            assert!(bounds().expand(0.01).contains_rect(*tile));
        }
    }

    #[test]
    fn single_value_fills_bounds() {
        let tiles = squarify(&[5.0], bounds());
        assert_eq!(tiles.len(), 1);
        assert!((tiles[0].area() - bounds().area()).abs() < 0.5);
    }

    #[test]
    fn empty_and_zero_inputs() {
        assert!(squarify(&[], bounds()).is_empty());
        let tiles = squarify(&[0.0, 0.0], bounds());
        assert_eq!(tiles.len(), 2);
        assert!(tiles.iter().all(|r| r.area() == 0.0));
    }

    #[test]
    fn worst_ratio_of_square_is_one() {
        assert!((worst_ratio(&[100.0], 10.0) - 1.0).abs() < 1e-6);
    }
}
