use super::*;

fn assert_close(a: f64, b: f64, tol: f64) {
    assert!((a - b).abs() < tol, "{a} != {b}");
}

#[test]
fn binomial_matches_pascal_triangle() {
    assert_eq!(binomial_coefficient(0, 0), 1.0);
    assert_eq!(binomial_coefficient(2, 1), 2.0);
    assert_eq!(binomial_coefficient(3, 1), 3.0);
    assert_eq!(binomial_coefficient(5, 2), 10.0);
    assert_eq!(binomial_coefficient(10, 10), 1.0);
    assert_eq!(binomial_coefficient(3, 4), 0.0);
}

#[test]
fn binomial_of_high_degree_stays_finite() {
    assert_close(binomial_coefficient(62, 31) / 465428353255261088.0, 1.0, 1e-12);
    let wide = binomial_coefficient(200, 100);
    assert!(wide.is_finite());
    assert_close(wide / 9.054851465610328e58, 1.0, 1e-12);
    let c = vec![2.5; 101];
    assert_close(evaluate_bernstein(&c, 0.3), 2.5, 1e-9);
}

#[test]
fn bernstein_hits_endpoints() {
    let c = [1.0, 5.0, -3.0, 7.0];
    assert_close(evaluate_bernstein(&c, 0.0), 1.0, 1e-12);
    assert_close(evaluate_bernstein(&c, 1.0), 7.0, 1e-12);
}

#[test]
fn bernstein_quadratic_midpoint() {
    // 0.25*0 + 0.5*2 + 0.25*0
    assert_close(evaluate_bernstein(&[0.0, 2.0, 0.0], 0.5), 1.0, 1e-12);
}

#[test]
fn bernstein_agrees_with_kurbo_cubic() {
    use kurbo::ParamCurve;
    let quad = CubicBez::new((0.0, 0.0), (10.0, 25.0), (30.0, -5.0), (40.0, 10.0));
    for t in [0.1, 0.33, 0.5, 0.9, 0.99999999] {
        let ours = evaluate_bernstein_point(&[quad.p0, quad.p1, quad.p2, quad.p3], t);
        let theirs = quad.eval(t);
        assert_close(ours.x, theirs.x, 1e-9);
        assert_close(ours.y, theirs.y, 1e-9);
    }
}

#[test]
fn empty_control_evaluates_to_zero() {
    assert_eq!(evaluate_bernstein(&[], 0.5), 0.0);
}

#[test]
fn end_tangent_of_straight_curve() {
    let quad = CubicBez::new((0.0, 0.0), (1.0, 1.0), (2.0, 2.0), (3.0, 3.0));
    assert_close(estimate_end_tangent_inclination(&quad), 45.0, 1e-6);
}

#[test]
fn end_tangent_with_collapsed_end_handle_points_from_first_handle() {
    // p2 == p3: the tangent at t -> 1 follows p1 -> p3.
    let quad = CubicBez::new((0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 10.0));
    assert_close(estimate_end_tangent_inclination(&quad), 0.0, 1e-4);
}

#[test]
fn end_tangent_follows_end_handle() {
    let quad = CubicBez::new((0.0, 0.0), (5.0, 0.0), (10.0, -5.0), (10.0, 0.0));
    assert_close(estimate_end_tangent_inclination(&quad), 90.0, 1e-4);
}
