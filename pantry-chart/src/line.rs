use pantry_data::projection::Point;

/// SVG path data through `points`, starting a new subpath after every point
/// that cannot be placed so missing values show as gaps.
pub fn path<F>(points: &[Point], mut place: F) -> String
where
    F: FnMut(Point) -> (f64, f64),
{
    let mut d = String::new();
    let mut pen_down = false;
    for point in points {
        if !point.is_defined() {
            pen_down = false;
            continue;
        }
        let (x, y) = place(*point);
        if !x.is_finite() || !y.is_finite() {
            pen_down = false;
            continue;
        }
        d.push(if pen_down { 'L' } else { 'M' });
        d.push_str(&format!("{},{}", round2(x), round2(y)));
        pen_down = true;
    }
    d
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_breaks_at_gaps() {
        let points = [
            Point::new(0.0, 1.0),
            Point::new(1.0, 2.0),
            Point::new(2.0, f64::NAN),
            Point::new(3.0, 4.0),
            Point::new(4.0, 5.0),
        ];
        let d = path(&points, |p| (p.time * 10.0, p.value));
        assert_eq!(d, "M0,1L10,2M30,4L40,5");
    }

    #[test]
    fn test_empty_when_nothing_defined() {
        let points = [Point::new(0.0, f64::NAN)];
        assert_eq!(path(&points, |p| (p.time, p.value)), "");
    }
}
