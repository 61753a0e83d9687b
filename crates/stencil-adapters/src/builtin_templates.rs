//! Built-in template catalogue.
//!
//! Nine definitions across four categories ship inside the binary. File
//! bodies live under `templates/<id>/` and are embedded with
//! [`include_str!`], so the catalogue needs no filesystem at runtime.
//!
//! | Category     | Templates                                            |
//! |--------------|------------------------------------------------------|
//! | `cicd`       | `jenkins-pipeline`, `github-actions`, `gitlab-ci`    |
//! | `container`  | `dockerfile-nodejs`, `dockerfile-python`             |
//! | `kubernetes` | `k8s-deployment`, `helm-chart`                       |
//! | `security`   | `pod-security-policy`, `network-policy`              |
//!
//! Every definition goes through [`TemplateDefinitionBuilder::build`], so a
//! schema mistake here surfaces as an error at registry construction rather
//! than at generation time.

use stencil_core::domain::{
    Category, ConfigMap, ConfigValue, DomainError, FieldOption, FieldSchema, FileTemplate,
    TemplateDefinition, TemplateDefinitionBuilder,
};
use tracing::instrument;

// ── Public API ────────────────────────────────────────────────────────────────

/// Category records in display order.
pub fn categories() -> Vec<Category> {
    vec![
        Category::new("cicd", "CI/CD", 1)
            .description("Continuous Integration and Continuous Deployment templates")
            .icon("rocket"),
        Category::new("container", "Container", 2)
            .description("Docker and containerization templates")
            .icon("box"),
        Category::new("kubernetes", "Kubernetes", 3)
            .description("Kubernetes manifests and Helm charts")
            .icon("kubernetes"),
        Category::new("security", "Security", 4)
            .description("Security and compliance templates")
            .icon("shield"),
    ]
}

/// Every built-in definition, in registration order.
#[instrument]
pub fn all_definitions() -> Result<Vec<TemplateDefinition>, DomainError> {
    [
        jenkins_pipeline(),
        github_actions(),
        gitlab_ci(),
        dockerfile_nodejs(),
        dockerfile_python(),
        k8s_deployment(),
        helm_chart(),
        pod_security_policy(),
        network_policy(),
    ]
    .into_iter()
    .map(TemplateDefinitionBuilder::build)
    .collect()
}

// ── Shared fields ─────────────────────────────────────────────────────────────

fn node_version(description: &str) -> FieldSchema {
    FieldSchema::select("nodeVersion", "Node.js Version", ["16", "18", "20"])
        .labelled_options(vec![
            FieldOption::new("Node.js 16", "16"),
            FieldOption::new("Node.js 18", "18"),
            FieldOption::new("Node.js 20", "20"),
        ])
        .required()
        .default_value("18")
        .description(description)
}

fn namespace() -> FieldSchema {
    FieldSchema::text("namespace", "Namespace")
        .required()
        .default_value("default")
        .description("Kubernetes namespace")
}

fn example<const N: usize>(pairs: [(&str, ConfigValue); N]) -> ConfigMap {
    pairs
        .into_iter()
        .map(|(key, value)| (key.to_owned(), value))
        .collect()
}

// ── CI/CD ─────────────────────────────────────────────────────────────────────

fn jenkins_pipeline() -> TemplateDefinitionBuilder {
    TemplateDefinition::builder("jenkins-pipeline")
        .name("Jenkins Pipeline")
        .description("Declarative Jenkins pipeline with best practices")
        .category("cicd")
        .file(FileTemplate::new(
            "Jenkinsfile",
            "./Jenkinsfile",
            "groovy",
            include_str!("../templates/jenkins-pipeline/Jenkinsfile.tmpl"),
        ))
        .field(
            FieldSchema::text("projectName", "Project Name")
                .required()
                .description("Name of your project"),
        )
        .field(
            FieldSchema::text("gitRepository", "Git Repository")
                .required()
                .description("Git repository URL"),
        )
        .field(node_version("Node.js version to use"))
        .field(
            FieldSchema::multiselect("stages", "Pipeline Stages", ["build", "test", "quality", "security", "deploy"])
                .labelled_options(vec![
                    FieldOption::new("Build", "build"),
                    FieldOption::new("Test", "test"),
                    FieldOption::new("Code Quality", "quality"),
                    FieldOption::new("Security Scan", "security"),
                    FieldOption::new("Deploy", "deploy"),
                ])
                .required()
                .default_value(ConfigValue::list(["build", "test", "deploy"]))
                .description("Select pipeline stages"),
        )
        .example(
            "basic",
            example([
                ("projectName", "my-webapp".into()),
                ("gitRepository", "https://github.com/user/my-webapp.git".into()),
                ("nodeVersion", "18".into()),
                ("stages", ConfigValue::list(["build", "test", "deploy"])),
            ]),
        )
}

fn github_actions() -> TemplateDefinitionBuilder {
    TemplateDefinition::builder("github-actions")
        .name("GitHub Actions")
        .description("GitHub Actions workflow with modern practices")
        .category("cicd")
        .file(FileTemplate::new(
            "<%= workflowName | kebab %>.yml",
            "./.github/workflows/<%= workflowName | kebab %>.yml",
            "yaml",
            include_str!("../templates/github-actions/workflow.yml.tmpl"),
        ))
        .field(
            FieldSchema::text("workflowName", "Workflow Name")
                .required()
                .description("Name of the GitHub Actions workflow"),
        )
        .field(
            FieldSchema::multiselect(
                "triggers",
                "Triggers",
                ["push", "pull_request", "schedule", "workflow_dispatch"],
            )
            .labelled_options(vec![
                FieldOption::new("Push", "push"),
                FieldOption::new("Pull Request", "pull_request"),
                FieldOption::new("Schedule", "schedule"),
                FieldOption::new("Manual", "workflow_dispatch"),
            ])
            .required()
            .default_value(ConfigValue::list(["push", "pull_request"]))
            .description("Workflow triggers"),
        )
        .field(
            FieldSchema::select(
                "runnerType",
                "Runner Type",
                ["ubuntu-latest", "ubuntu-22.04", "ubuntu-20.04", "windows-latest", "macos-latest"],
            )
            .labelled_options(vec![
                FieldOption::new("Ubuntu Latest", "ubuntu-latest"),
                FieldOption::new("Ubuntu 22.04", "ubuntu-22.04"),
                FieldOption::new("Ubuntu 20.04", "ubuntu-20.04"),
                FieldOption::new("Windows Latest", "windows-latest"),
                FieldOption::new("macOS Latest", "macos-latest"),
            ])
            .required()
            .default_value("ubuntu-latest")
            .description("GitHub Actions runner type"),
        )
        .field(node_version("Node.js version to use"))
        .example(
            "web-app",
            example([
                ("workflowName", "CI/CD Pipeline".into()),
                (
                    "triggers",
                    ConfigValue::list(["push", "pull_request", "workflow_dispatch"]),
                ),
                ("runnerType", "ubuntu-latest".into()),
                ("nodeVersion", "18".into()),
            ]),
        )
}

fn gitlab_ci() -> TemplateDefinitionBuilder {
    TemplateDefinition::builder("gitlab-ci")
        .name("GitLab CI")
        .description("GitLab CI/CD pipeline configuration")
        .category("cicd")
        .file(FileTemplate::new(
            ".gitlab-ci.yml",
            "./.gitlab-ci.yml",
            "yaml",
            include_str!("../templates/gitlab-ci/gitlab-ci.yml.tmpl"),
        ))
        .field(
            FieldSchema::text("image", "Docker Image")
                .required()
                .default_value("node:18")
                .description("Docker image for the pipeline"),
        )
        .field(
            FieldSchema::multiselect("services", "Services", ["postgres:13", "mysql:8", "redis:6", "mongo:5"])
                .labelled_options(vec![
                    FieldOption::new("PostgreSQL", "postgres:13"),
                    FieldOption::new("MySQL", "mysql:8"),
                    FieldOption::new("Redis", "redis:6"),
                    FieldOption::new("MongoDB", "mongo:5"),
                ])
                .description("Additional services to run"),
        )
        .example(
            "nodejs-app",
            example([
                ("image", "node:18".into()),
                ("services", ConfigValue::list(["postgres:13", "redis:6"])),
            ]),
        )
}

// ── Container ─────────────────────────────────────────────────────────────────

fn dockerfile_nodejs() -> TemplateDefinitionBuilder {
    TemplateDefinition::builder("dockerfile-nodejs")
        .name("Node.js Dockerfile")
        .description("Multi-stage Dockerfile for Node.js applications")
        .category("container")
        .file(FileTemplate::new(
            "Dockerfile",
            "./Dockerfile",
            "dockerfile",
            include_str!("../templates/dockerfile-nodejs/Dockerfile.tmpl"),
        ))
        .field(node_version("Node.js version"))
        .field(
            FieldSchema::select("packageManager", "Package Manager", ["npm", "yarn", "pnpm"])
                .required()
                .default_value("npm")
                .description("Package manager to use"),
        )
        .field(
            FieldSchema::number("port", "Exposed Port")
                .required()
                .default_value(3000)
                .description("Port to expose"),
        )
        .example(
            "express-app",
            example([
                ("nodeVersion", "18".into()),
                ("packageManager", "npm".into()),
                ("port", 3000.into()),
            ]),
        )
}

fn dockerfile_python() -> TemplateDefinitionBuilder {
    TemplateDefinition::builder("dockerfile-python")
        .name("Python Dockerfile")
        .description("Multi-stage Dockerfile for Python applications")
        .category("container")
        .file(FileTemplate::new(
            "Dockerfile",
            "./Dockerfile",
            "dockerfile",
            include_str!("../templates/dockerfile-python/Dockerfile.tmpl"),
        ))
        .file(FileTemplate::new(
            ".dockerignore",
            "./.dockerignore",
            "text",
            include_str!("../templates/dockerfile-python/dockerignore.tmpl"),
        ))
        .field(
            FieldSchema::select("pythonVersion", "Python Version", ["3.9", "3.10", "3.11", "3.12"])
                .labelled_options(vec![
                    FieldOption::new("Python 3.9", "3.9"),
                    FieldOption::new("Python 3.10", "3.10"),
                    FieldOption::new("Python 3.11", "3.11"),
                    FieldOption::new("Python 3.12", "3.12"),
                ])
                .required()
                .default_value("3.11")
                .description("Python version"),
        )
        .field(
            FieldSchema::number("port", "Exposed Port")
                .required()
                .default_value(8000)
                .description("Port to expose"),
        )
        .example(
            "flask-app",
            example([("pythonVersion", "3.11".into()), ("port", 8000.into())]),
        )
}

// ── Kubernetes ────────────────────────────────────────────────────────────────

fn k8s_deployment() -> TemplateDefinitionBuilder {
    TemplateDefinition::builder("k8s-deployment")
        .name("Kubernetes Deployment")
        .description("Kubernetes deployment with service and ingress")
        .category("kubernetes")
        .file(FileTemplate::new(
            "deployment.yaml",
            "./k8s/deployment.yaml",
            "yaml",
            include_str!("../templates/k8s-deployment/deployment.yaml.tmpl"),
        ))
        .file(FileTemplate::new(
            "service.yaml",
            "./k8s/service.yaml",
            "yaml",
            include_str!("../templates/k8s-deployment/service.yaml.tmpl"),
        ))
        .file(FileTemplate::new(
            "ingress.yaml",
            "./k8s/ingress.yaml",
            "yaml",
            include_str!("../templates/k8s-deployment/ingress.yaml.tmpl"),
        ))
        .field(
            FieldSchema::text("appName", "Application Name")
                .required()
                .description("Name of the application"),
        )
        .field(namespace())
        .field(
            FieldSchema::text("image", "Docker Image")
                .required()
                .description("Docker image to deploy"),
        )
        .field(
            FieldSchema::number("replicas", "Replicas")
                .required()
                .default_value(3)
                .description("Number of replicas"),
        )
        .field(
            FieldSchema::number("port", "Service Port")
                .required()
                .default_value(80)
                .description("Service port"),
        )
        .field(
            FieldSchema::number("targetPort", "Target Port")
                .required()
                .default_value(8080)
                .description("Container port"),
        )
        .example(
            "web-app",
            example([
                ("appName", "my-web-app".into()),
                ("namespace", "production".into()),
                ("image", "my-registry/my-web-app:latest".into()),
                ("replicas", 3.into()),
                ("port", 80.into()),
                ("targetPort", 3000.into()),
            ]),
        )
}

fn helm_chart() -> TemplateDefinitionBuilder {
    TemplateDefinition::builder("helm-chart")
        .name("Helm Chart")
        .description("Complete Helm chart with best practices")
        .category("kubernetes")
        .file(FileTemplate::new(
            "Chart.yaml",
            "./<%= chartName | kebab %>/Chart.yaml",
            "yaml",
            include_str!("../templates/helm-chart/Chart.yaml.tmpl"),
        ))
        .file(FileTemplate::new(
            "values.yaml",
            "./<%= chartName | kebab %>/values.yaml",
            "yaml",
            include_str!("../templates/helm-chart/values.yaml.tmpl"),
        ))
        .file(FileTemplate::new(
            "deployment.yaml",
            "./<%= chartName | kebab %>/templates/deployment.yaml",
            "yaml",
            include_str!("../templates/helm-chart/deployment.yaml.tmpl"),
        ))
        .field(
            FieldSchema::text("chartName", "Chart Name")
                .required()
                .description("Name of the Helm chart"),
        )
        .field(
            FieldSchema::text("chartVersion", "Chart Version")
                .required()
                .default_value("0.1.0")
                .description("Version of the chart"),
        )
        .field(
            FieldSchema::text("appVersion", "App Version")
                .required()
                .default_value("1.0.0")
                .description("Version of the application"),
        )
        .field(
            FieldSchema::boolean("includeIngress", "Include Ingress")
                .default_value(true)
                .description("Include ingress configuration"),
        )
        .field(
            FieldSchema::boolean("includeHPA", "Include HPA")
                .default_value(false)
                .description("Include Horizontal Pod Autoscaler"),
        )
        .example(
            "microservice",
            example([
                ("chartName", "my-service".into()),
                ("chartVersion", "0.1.0".into()),
                ("appVersion", "1.0.0".into()),
                ("includeIngress", true.into()),
                ("includeHPA", true.into()),
            ]),
        )
}

// ── Security ──────────────────────────────────────────────────────────────────

fn pod_security_policy() -> TemplateDefinitionBuilder {
    TemplateDefinition::builder("pod-security-policy")
        .name("Pod Security Policy")
        .description("Kubernetes Pod Security Policy with best practices")
        .category("security")
        .file(FileTemplate::new(
            "pod-security-policy.yaml",
            "./security/pod-security-policy.yaml",
            "yaml",
            include_str!("../templates/pod-security-policy/pod-security-policy.yaml.tmpl"),
        ))
        .file(FileTemplate::new(
            "rbac.yaml",
            "./security/rbac.yaml",
            "yaml",
            include_str!("../templates/pod-security-policy/rbac.yaml.tmpl"),
        ))
        .field(
            FieldSchema::text("policyName", "Policy Name")
                .required()
                .description("Name of the security policy"),
        )
        .field(
            FieldSchema::boolean("allowPrivileged", "Allow Privileged")
                .default_value(false)
                .description("Allow privileged containers"),
        )
        .field(
            FieldSchema::boolean("allowHostNetwork", "Allow Host Network")
                .default_value(false)
                .description("Allow host network access"),
        )
        .example(
            "restrictive",
            example([
                ("policyName", "restrictive-psp".into()),
                ("allowPrivileged", false.into()),
                ("allowHostNetwork", false.into()),
            ]),
        )
}

fn network_policy() -> TemplateDefinitionBuilder {
    TemplateDefinition::builder("network-policy")
        .name("Network Policy")
        .description("Kubernetes Network Policy for microsegmentation")
        .category("security")
        .file(FileTemplate::new(
            "network-policy.yaml",
            "./security/network-policy.yaml",
            "yaml",
            include_str!("../templates/network-policy/network-policy.yaml.tmpl"),
        ))
        .file(FileTemplate::new(
            "deny-all-network-policy.yaml",
            "./security/deny-all-network-policy.yaml",
            "yaml",
            include_str!("../templates/network-policy/deny-all.yaml.tmpl"),
        ))
        .field(
            FieldSchema::text("policyName", "Policy Name")
                .required()
                .description("Name of the network policy"),
        )
        .field(namespace())
        .field(
            FieldSchema::multiselect("policyType", "Policy Type", ["Ingress", "Egress"])
                .required()
                .default_value(ConfigValue::list(["Ingress", "Egress"]))
                .description("Type of network policy"),
        )
        .example(
            "webapp-policy",
            example([
                ("policyName", "webapp-network-policy".into()),
                ("namespace", "production".into()),
                ("policyType", ConfigValue::list(["Ingress", "Egress"])),
            ]),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nine_valid_definitions() {
        let defs = all_definitions().unwrap();
        let ids: Vec<_> = defs.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(
            ids,
            [
                "jenkins-pipeline",
                "github-actions",
                "gitlab-ci",
                "dockerfile-nodejs",
                "dockerfile-python",
                "k8s-deployment",
                "helm-chart",
                "pod-security-policy",
                "network-policy",
            ]
        );
    }

    #[test]
    fn every_definition_has_a_category_record() {
        let categories = categories();
        for def in all_definitions().unwrap() {
            assert!(
                categories.iter().any(|c| c.id == def.category),
                "{} has no category record",
                def.id
            );
        }
    }

    #[test]
    fn every_definition_documents_an_example() {
        for def in all_definitions().unwrap() {
            assert!(!def.examples.is_empty(), "{} has no example", def.id);
        }
    }
}
