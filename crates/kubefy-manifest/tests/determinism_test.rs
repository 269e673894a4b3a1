use kubefy_core::RunConfiguration;
use kubefy_dockerfile::{ContainerDescription, Dockerfile};
use kubefy_manifest::synthesize;
use proptest::prelude::*;

fn dockerfile_strategy() -> impl Strategy<Value = String> {
    (
        "[a-z]{1,10}(:[0-9]{1,2})?",
        proptest::collection::vec(1u16..=65535, 0..5),
        proptest::collection::vec(("[A-Z_]{1,8}", "[a-z0-9]{0,8}"), 0..5),
    )
        .prop_map(|(image, ports, env)| {
            let mut content = format!("FROM {image}\n");
            for port in ports {
                content.push_str(&format!("EXPOSE {port}\n"));
            }
            for (key, value) in env {
                content.push_str(&format!("ENV {key}={value}\n"));
            }
            content
        })
}

proptest! {
    #[test]
    fn same_input_same_output(content in dockerfile_strategy(), name in "[a-z][a-z0-9-]{0,20}[a-z0-9]") {
        let config = RunConfiguration::new(name);
        let render = || {
            let desc = ContainerDescription::from_dockerfile(&Dockerfile::parse(&content).unwrap());
            synthesize(&desc, &config).unwrap().to_documents().unwrap()
        };
        prop_assert_eq!(render(), render());
    }

    #[test]
    fn service_exists_iff_ports_exposed(content in dockerfile_strategy()) {
        let desc = ContainerDescription::from_dockerfile(&Dockerfile::parse(&content).unwrap());
        let manifests = synthesize(&desc, &RunConfiguration::new("prop")).unwrap();
        prop_assert_eq!(manifests.service.is_some(), content.contains("\nEXPOSE "));
    }
}
