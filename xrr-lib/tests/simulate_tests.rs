use approx::assert_relative_eq;
use xrr::{Layer, Model, SimulationRequest, XrrError, simulate};

fn si_request() -> SimulationRequest {
    let mut req = SimulationRequest::new(vec![Layer::new("1", "Si", 0.0, 0.0, 2.3)]);
    req.q_min = 0.0;
    req.q_max = 0.1;
    req.points = 5;
    req
}

#[test]
fn test_default_model_reproduces_decay_curve() {
    let out = simulate(&si_request()).unwrap();
    let expected_q = [0.0, 0.025, 0.05, 0.075, 0.1];
    assert_eq!(out.q.len(), 5);
    assert_eq!(out.intensity.len(), 5);
    for (i, &q) in expected_q.iter().enumerate() {
        assert_relative_eq!(out.q[i], q, epsilon = 1e-12);
        let want = 1e9 * (q + 0.01f64).powi(-4);
        assert_relative_eq!(out.intensity[i], want, max_relative = 1e-9);
    }
}

#[test]
fn test_json_request_round_trip() {
    let json = r#"{
        "layers": [{"id": "1", "name": "Si", "thickness": 0, "roughness": 0, "density": 2.3}],
        "q_min": 0, "q_max": 0.1, "points": 5
    }"#;
    let req: SimulationRequest = serde_json::from_str(json).unwrap();
    assert_eq!(req.model, Model::Synthetic);
    let out = simulate(&req).unwrap();

    let body = serde_json::to_value(&out).unwrap();
    assert_eq!(body["q"].as_array().unwrap().len(), 5);
    assert_eq!(body["intensity"].as_array().unwrap().len(), 5);
}

#[test]
fn test_grid_is_linear_and_sized() {
    for points in [1, 2, 3, 100, 257] {
        let mut req = si_request();
        req.q_min = 0.01;
        req.q_max = 0.4;
        req.points = points;
        let out = simulate(&req).unwrap();
        assert_eq!(out.q.len(), points);
        assert_eq!(out.intensity.len(), points);
        assert_eq!(out.q[0], 0.01);
        if points >= 2 {
            assert_eq!(out.q[points - 1], 0.4);
            let step = (0.4 - 0.01) / (points - 1) as f64;
            for w in out.q.windows(2) {
                assert_relative_eq!(w[1] - w[0], step, epsilon = 1e-12);
            }
        }
    }
}

#[test]
fn test_decay_curve_decreases_for_any_roughness() {
    for sigma in [0.0, 2.5, 8.0] {
        let mut req = SimulationRequest::new(vec![Layer::new("1", "Film", 30.0, sigma, 1.0)]);
        req.q_min = 0.001;
        req.points = 300;
        let out = simulate(&req).unwrap();
        assert!(
            out.intensity.windows(2).all(|w| w[1] < w[0]),
            "not decreasing for sigma = {sigma}"
        );
    }
}

#[test]
fn test_empty_layers_is_a_validation_error() {
    let req = SimulationRequest::new(Vec::new());
    assert_eq!(simulate(&req), Err(XrrError::EmptyStack));

    let mut req = SimulationRequest::new(Vec::new());
    req.model = Model::Parratt;
    assert_eq!(simulate(&req), Err(XrrError::EmptyStack));
}

#[test]
fn test_bad_grid_is_rejected() {
    let mut req = si_request();
    req.points = 0;
    assert!(matches!(simulate(&req), Err(XrrError::InvalidQGrid(_))));

    let mut req = si_request();
    req.q_min = 0.2;
    req.q_max = 0.1;
    assert!(matches!(simulate(&req), Err(XrrError::InvalidQGrid(_))));
}

#[test]
fn test_negative_q_min_is_rejected() {
    let mut req = si_request();
    req.q_min = -0.02;
    req.q_max = 0.0;
    req.points = 3;
    assert!(matches!(simulate(&req), Err(XrrError::InvalidQGrid(_))));
}

#[test]
fn test_intensity_finite_at_caller_q() {
    // measured curves may carry small negative Q from a zero offset
    let req = si_request();
    let intensity = xrr::simulate_at(&req, &[-0.01, 0.0, 0.01]).unwrap();
    assert!(intensity.iter().all(|v| v.is_finite() && *v > 0.0));
    assert_eq!(intensity[0], intensity[2]);
}

#[test]
fn test_parratt_request_from_json() {
    let json = r#"{
        "layers": [
            {"id": "1", "name": "Gold", "thickness": 100, "roughness": 5, "density": 19.32},
            {"id": "2", "name": "Cr adhesion", "thickness": 20, "roughness": 4.5, "density": 7.19, "formula": "Cr"},
            {"id": "3", "name": "substrate", "thickness": 0, "roughness": 3, "density": 2.33, "sld": 20.07, "isld": 0.46}
        ],
        "q_min": 0.005, "q_max": 0.3, "points": 120,
        "model": "parratt", "roughness_model": "nevot_croce",
        "resolution": {"kind": "relative", "fraction": 0.05},
        "scale": 1.0, "background": 1e-8
    }"#;
    let req: SimulationRequest = serde_json::from_str(json).unwrap();
    let out = simulate(&req).unwrap();
    assert_eq!(out.intensity.len(), 120);
    for &r in &out.intensity {
        assert!(r.is_finite());
        assert!(r >= 1e-8 && r < 1.01, "R = {r}");
    }
}
