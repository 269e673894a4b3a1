use kubefy_dockerfile::{ContainerDescription, Dockerfile, ExposedPort, Protocol, normalize};

fn describe(content: &str) -> ContainerDescription {
    ContainerDescription::from_dockerfile(&Dockerfile::parse(content).unwrap())
}

#[test]
fn maps_reference_dockerfile() {
    let desc = describe(
        "FROM node:18-alpine\nWORKDIR /app\nEXPOSE 3000\nENV NODE_ENV=production\nCMD [\"npm\",\"start\"]\n",
    );

    assert_eq!(desc.image, "node:18-alpine");
    assert_eq!(desc.working_dir.as_deref(), Some("/app"));
    assert_eq!(desc.ports.iter().copied().collect::<Vec<_>>(), vec![ExposedPort::tcp(3000)]);
    assert_eq!(desc.env.get("NODE_ENV"), Some("production"));
    assert_eq!(desc.env.len(), 1);
    assert_eq!(
        desc.args,
        Some(vec!["npm".to_owned(), "start".to_owned()])
    );
    assert_eq!(desc.command, None);
}

#[test]
fn last_workdir_and_cmd_win() {
    let desc = describe(
        "FROM alpine\nWORKDIR /first\nCMD [\"a\"]\nWORKDIR /second\nCMD [\"b\"]\n",
    );

    assert_eq!(desc.working_dir.as_deref(), Some("/second"));
    assert_eq!(desc.args, Some(vec!["b".to_owned()]));
}

#[test]
fn relative_workdir_builds_on_previous() {
    let desc = describe("FROM alpine\nWORKDIR /app\nWORKDIR web\n");
    assert_eq!(desc.working_dir.as_deref(), Some("/app/web"));
}

#[test]
fn ports_accumulate_and_deduplicate() {
    let desc = describe("FROM alpine\nEXPOSE 8080 80\nEXPOSE 80/tcp 80/udp\nEXPOSE 8080\n");

    let ports: Vec<_> = desc.ports.iter().copied().collect();
    assert_eq!(
        ports,
        vec![
            ExposedPort::tcp(80),
            ExposedPort {
                port: 80,
                protocol: Protocol::Udp
            },
            ExposedPort::tcp(8080),
        ]
    );
}

#[test]
fn env_accumulates_and_later_value_wins() {
    let desc = describe("FROM alpine\nENV B=1 A=2\nENV C 3\nENV B=4\n");

    let pairs: Vec<_> = desc.env.iter().collect();
    assert_eq!(pairs, vec![("B", "4"), ("A", "2"), ("C", "3")]);
}

#[test]
fn command_and_args_are_independent() {
    let desc = describe("FROM node\nENTRYPOINT [\"node\"]\nCMD [\"server.js\"]\n");
    assert_eq!(desc.command, Some(vec!["node".to_owned()]));
    assert_eq!(desc.args, Some(vec!["server.js".to_owned()]));

    let only_entrypoint = describe("FROM node\nENTRYPOINT [\"node\"]\n");
    assert_eq!(only_entrypoint.args, None);
}

#[test]
fn empty_exec_array_clears_field() {
    let desc = describe("FROM alpine\nCMD [\"sh\"]\nCMD []\n");
    assert_eq!(desc.args, None);
}

#[test]
fn unmapped_instructions_do_not_affect_output() {
    let plain = describe("FROM alpine\nEXPOSE 80\n");
    let noisy = describe(
        "FROM alpine\nRUN apk add curl\nCOPY . .\nUSER nobody\nEXPOSE 80\nLABEL x=y\n",
    );
    assert_eq!(plain, noisy);
}

#[test]
fn normalize_is_deterministic() {
    let dockerfile = Dockerfile::parse("FROM alpine\nENV A=1\nEXPOSE 1 2 3\n").unwrap();
    assert_eq!(
        normalize(dockerfile.instructions()),
        normalize(dockerfile.instructions())
    );
}
