use isolation::config::{AgentKind, AgentSpec, TournamentConfig};

#[test]
fn default_config_is_valid() {
    let c = TournamentConfig::default();
    c.validate().unwrap();
    assert_eq!(c.agents.len(), 4);
    assert_eq!(c.opponents.len(), 7);
    assert_eq!(c.time_limit().as_millis(), 150);
}

#[test]
fn partial_json_fills_defaults() {
    let c = TournamentConfig::from_json(r#"{ "matches": 2, "width": 5, "height": 6 }"#).unwrap();
    assert_eq!(c.matches, 2);
    assert_eq!(c.board().unwrap().height(), 6);
    assert_eq!(c.agents, TournamentConfig::default().agents);
}

#[test]
fn agent_spec_parses_kind_names() {
    let c = TournamentConfig::from_json(
        r#"{ "agents": [ { "name": "X", "kind": "alphabeta", "heuristic": "phased", "use_tt": true } ],
             "opponents": [ { "name": "Y", "kind": "minimax", "heuristic": "open", "depth": 2 } ] }"#,
    ).unwrap();
    assert_eq!(c.agents[0].kind, AgentKind::AlphaBeta);
    assert!(c.agents[0].use_tt);
    assert_eq!(c.opponents[0], AgentSpec { depth: 2, ..AgentSpec::new("Y", AgentKind::Minimax, "open") });
}

#[test]
fn validation_errors() {
    use isolation::error::ConfigError;
    let bad = [
        r#"{ "time_limit_ms": 0 }"#,
        r#"{ "matches": 0 }"#,
        r#"{ "agents": [] }"#,
        r#"{ "width": 40 }"#,
        r#"{ "width": 1, "height": 1 }"#,
    ];
    for json in bad {
        assert!(TournamentConfig::from_json(json).is_err(), "{json} should be rejected");
    }
    let err = TournamentConfig::from_json(r#"{ "opponents": [ { "name": "Z", "kind": "greedy", "heuristic": "wat" } ] }"#).unwrap_err();
    assert!(matches!(err, ConfigError::UnknownHeuristic(ref h) if h == "wat"));
    assert!(matches!(TournamentConfig::from_json("{ nope"), Err(ConfigError::JsonParse(_))));
}

#[test]
fn missing_file_reports_path() {
    use isolation::error::ConfigError;
    let path = std::path::Path::new("/definitely/not/here.json");
    match TournamentConfig::load(path) {
        Err(ConfigError::FileRead { path: p, .. }) => assert_eq!(p, path),
        other => panic!("unexpected {other:?}"),
    }
}
