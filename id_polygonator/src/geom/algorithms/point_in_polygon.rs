use ultraviolet::Vec2;

/// Crossing test over the boundary segments of a closed polygon.
///
/// Points exactly on the boundary are treated as outside. The segments do
/// not need to be given in order, only to form closed loops together.
pub fn point_in_polygon(point: Vec2, segments: impl IntoIterator<Item = (Vec2, Vec2)>) -> bool {
    let mut k = 0;

    let x = point.x as f64;
    let y = point.y as f64;

    for (a, b) in segments {
        let u1 = a.x as f64 - x;
        let v1 = a.y as f64 - y;
        let u2 = b.x as f64 - x;
        let v2 = b.y as f64 - y;

        if (v1 < 0.0 && v2 < 0.0) || (v1 > 0.0 && v2 > 0.0) {
            continue;
        }

        let f = (u1 * v2) - (u2 * v1);

        if v2 > 0.0 && v1 <= 0.0 {
            if f > 0.0 {
                k += 1;
            } else if f == 0.0 {
                return false;
            }
        } else if v1 > 0.0 && v2 <= 0.0 {
            if f < 0.0 {
                k += 1;
            } else if f == 0.0 {
                return false;
            }
        } else if (v2 == 0.0 && v1 < 0.0) || (v1 == 0.0 && v2 < 0.0) {
            if f == 0.0 {
                return false;
            }
        } else if v1 == 0.0 && v2 == 0.0 && ((u2 <= 0.0 && u1 >= 0.0) || (u1 <= 0.0 && u2 >= 0.0))
        {
            return false;
        }
    }

    k % 2 == 1
}
