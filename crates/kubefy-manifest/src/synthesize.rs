use kubefy_core::{Result, RunConfiguration};
use kubefy_dockerfile::ContainerDescription;

use crate::resource::{
    Container, ContainerPort, Deployment, DeploymentSpec, EnvVar, LabelSelector, Labels,
    Manifests, ObjectMeta, PodSpec, PodTemplateSpec, Service, ServicePort, ServiceSpec,
    TemplateMeta,
};

/// Label key used for the Deployment selector and the Service selector.
pub const APP_LABEL: &str = "app";

/// Builds the Deployment and, if any port is exposed, the Service.
///
/// The run configuration is validated first; nothing is built for an
/// invalid configuration.
pub fn synthesize(
    container: &ContainerDescription,
    config: &RunConfiguration,
) -> Result<Manifests> {
    config.validate()?;

    let deployment = build_deployment(container, config);
    let service = if container.ports.is_empty() {
        None
    } else {
        Some(build_service(container, config))
    };

    tracing::debug!(
        name = config.name.as_str(),
        service = service.is_some(),
        "synthesized resources"
    );

    Ok(Manifests {
        deployment,
        service,
    })
}

fn app_labels(name: &str) -> Labels {
    Labels::from([(APP_LABEL.to_owned(), name.to_owned())])
}

fn object_meta(config: &RunConfiguration) -> ObjectMeta {
    ObjectMeta {
        name: config.name.clone(),
        namespace: config.namespace.clone(),
        labels: app_labels(&config.name),
    }
}

fn build_deployment(desc: &ContainerDescription, config: &RunConfiguration) -> Deployment {
    let mut env: Vec<EnvVar> = desc
        .env
        .iter()
        .map(|(name, value)| EnvVar {
            name: name.to_owned(),
            value: value.to_owned(),
        })
        .collect();
    env.sort_by(|a, b| a.name.cmp(&b.name));

    let ports = desc
        .ports
        .iter()
        .map(|p| ContainerPort {
            container_port: p.port,
            protocol: p.protocol.kubernetes_name(),
        })
        .collect();

    let container = Container {
        name: config.name.clone(),
        image: desc.image.clone(),
        working_dir: desc.working_dir.clone(),
        command: desc.command.clone(),
        args: desc.args.clone(),
        env,
        ports,
    };

    Deployment {
        api_version: "apps/v1",
        kind: "Deployment",
        metadata: object_meta(config),
        spec: DeploymentSpec {
            replicas: config.replicas,
            selector: LabelSelector {
                match_labels: app_labels(&config.name),
            },
            template: PodTemplateSpec {
                metadata: TemplateMeta {
                    labels: app_labels(&config.name),
                },
                spec: PodSpec {
                    containers: vec![container],
                },
            },
        },
    }
}

fn build_service(desc: &ContainerDescription, config: &RunConfiguration) -> Service {
    let ports = desc
        .ports
        .iter()
        .map(|p| ServicePort {
            name: format!("{}-{}", p.protocol.as_str(), p.port),
            port: p.port,
            target_port: p.port,
            protocol: p.protocol.kubernetes_name(),
        })
        .collect();

    Service {
        api_version: "v1",
        kind: "Service",
        metadata: object_meta(config),
        spec: ServiceSpec {
            service_type: config.service_type,
            selector: app_labels(&config.name),
            ports,
        },
    }
}
