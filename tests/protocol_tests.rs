#![cfg(feature = "serialize")]

use phys_worker::{Request, Response, RigidBodyType, ShapeKind, SimulatorConfig, UpdatePayload};

#[test]
fn test_requests_decode_from_json() {
    let json = r#"{
        "op": "createBodies",
        "bodies": [{
            "id": 1,
            "name": "door",
            "type": 0,
            "shape": 0,
            "transform": [0, 1, 0, 0, 0, 0, 1, 2, 2, 0.5],
            "trigger": true,
            "entity": "player",
            "enter": "openDoor"
        }]
    }"#;

    let request: Request = serde_json::from_str(json).unwrap();
    match request {
        Request::CreateBodies { bodies } => {
            let door = &bodies[0];
            assert_eq!(door.kind, RigidBodyType::Static);
            assert_eq!(door.shape, ShapeKind::Box);
            assert!(door.trigger);
            assert_eq!(door.enter.as_deref(), Some("openDoor"));
            assert_eq!(door.leave, None);
            assert_eq!(door.mass, 0.0);
        }
        other => panic!("unexpected request {:?}", other),
    }

    let teleport: Request = serde_json::from_str(
        r#"{"op":"teleportMany","ids":[1,2],"transforms":[0,0,0,0,0,0,1,1,1,1,0,0,0,1],"clearForces":true}"#,
    )
    .unwrap();
    assert_eq!(teleport.op(), "teleportMany");
}

#[test]
fn test_unknown_wire_codes_are_rejected() {
    let json = r#"{"op":"createBodies","bodies":[{"id":1,"type":7,"shape":0,"transform":[]}]}"#;
    assert!(serde_json::from_str::<Request>(json).is_err());

    let json = r#"{"op":"createBodies","bodies":[{"id":1,"type":1,"shape":9,"transform":[]}]}"#;
    assert!(serde_json::from_str::<Request>(json).is_err());
}

#[test]
fn test_responses_encode_to_json() {
    let ready = serde_json::to_value(Response::Ready).unwrap();
    assert_eq!(ready, serde_json::json!({ "op": "ready" }));

    let update = Response::Update(UpdatePayload {
        transforms: vec![0.0; 7],
        collision_start: vec![(1, vec![2])],
        ..UpdatePayload::default()
    });
    let value = serde_json::to_value(update).unwrap();
    assert_eq!(value["op"], "update");
    assert_eq!(value["collisionStart"], serde_json::json!([[1, [2]]]));
    assert_eq!(value["triggerEnter"], serde_json::json!([]));
}

#[test]
fn test_config_fills_missing_fields() {
    let config: SimulatorConfig = serde_json::from_str(r#"{"maxSubsteps": 10}"#).unwrap();
    assert_eq!(config.max_substeps, 10);
    assert_eq!(config.fixed_time_step, SimulatorConfig::default().fixed_time_step);
}

#[test]
fn test_error_response_round_trips() {
    let error = Response::Error {
        request: "applyCentralImpulse".to_owned(),
        message: "unknown body 42".to_owned(),
    };

    let value = serde_json::to_value(&error).unwrap();
    assert_eq!(value["op"], "error");
    assert_eq!(value["request"], "applyCentralImpulse");

    let decoded: Response = serde_json::from_value(value).unwrap();
    assert_eq!(decoded, error);
}
