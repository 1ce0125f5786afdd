//! Result reporting
//!
//! Turns a successful build into the URLs of the services it deployed.
//! Purely presentational: no requests are made here.

use colored::*;
use ectocet_core::domain::build::BuildResult;
use ectocet_core::domain::project::{Project, Service};
use tracing::warn;

/// Public URL of a deployed service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceUrl {
    pub name: String,
    pub url: String,
}

/// Hostname of a service without a custom domain
pub fn derived_host(service: &Service, project: &Project, root_domain: &str) -> String {
    format!(
        "{}-{}-{}.{}",
        service.name, project.namespace, project.team.namespace, root_domain
    )
}

/// URLs of every service built by `result`, in build order
///
/// A custom domain is used verbatim; otherwise the host is derived from the
/// service, project and team namespaces under `root_domain`.
pub fn service_urls(project: &Project, result: &BuildResult, root_domain: &str) -> Vec<ServiceUrl> {
    result
        .service_builds
        .iter()
        .filter_map(|service_build| {
            let Some(service) = project.service(&service_build.service_id) else {
                warn!(
                    service_id = %service_build.service_id,
                    "Build reported a service the project does not list"
                );
                return None;
            };

            let host = match &service.custom_domain {
                Some(domain) => domain.clone(),
                None => derived_host(service, project, root_domain),
            };

            Some(ServiceUrl {
                name: service.name.clone(),
                url: format!("https://{host}"),
            })
        })
        .collect()
}

/// Print the deployed service URLs
pub fn print_service_urls(urls: &[ServiceUrl]) {
    if urls.is_empty() {
        println!("{}", "Deployed. No services reported a URL.".yellow());
        return;
    }

    println!("{}", "Deployed:".green().bold());
    for url in urls {
        println!("  {} {}  {}", "▸".cyan(), url.name.bold(), url.url.cyan());
    }
}
