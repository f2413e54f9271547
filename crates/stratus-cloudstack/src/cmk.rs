//! CloudMonkey CLI wrapper
//!
//! Wraps `cmk` invocations for the handful of CloudStack APIs the
//! reconciliation core needs. All commands run with `-o json`; zero
//! matches come back as an empty envelope, which is not an error.

use crate::error::{CloudstackError, Result};
use serde::Deserialize;
use std::process::Stdio;
use tokio::process::Command;

/// cmk CLI wrapper, optionally scoped to a named profile.
pub struct Cmk {
    profile: Option<String>,
}

impl Cmk {
    pub fn new(profile: Option<String>) -> Self {
        Self { profile }
    }

    /// Check that cmk is installed and the profile can reach the API.
    pub async fn check_auth(&self) -> Result<()> {
        let which = Command::new("which").arg("cmk").output().await?;
        if !which.status.success() {
            return Err(CloudstackError::CmkNotFound);
        }

        // Cheapest authenticated call; fails on bad keys or endpoint.
        self.run(&["list", "capabilities"])
            .await
            .map_err(|e| CloudstackError::AuthenticationFailed(e.to_string()))?;
        Ok(())
    }

    /// Run a cmk command and return stdout.
    async fn run(&self, args: &[&str]) -> Result<String> {
        let mut cmd = Command::new("cmk");
        cmd.arg("-o").arg("json");
        if let Some(ref profile) = self.profile {
            cmd.arg("-p").arg(profile);
        }
        cmd.args(args);
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        tracing::debug!("Running: cmk {}", args.join(" "));

        let output = cmd.output().await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(CloudstackError::CommandFailed(stderr.trim().to_string()));
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }

    /// List zones by exact name.
    pub async fn list_zones(&self, name: &str) -> Result<Vec<EntityRef>> {
        let filter = format!("name={name}");
        let output = self.run(&["list", "zones", &filter]).await?;
        Ok(parse_zone_list(&output)?.zones)
    }

    /// List templates by exact name. `templatefilter=all` so private
    /// and featured templates are both visible.
    pub async fn list_templates(&self, name: &str) -> Result<Vec<EntityRef>> {
        let filter = format!("name={name}");
        let output = self
            .run(&["list", "templates", "templatefilter=all", &filter])
            .await?;
        Ok(parse_template_list(&output)?.templates)
    }

    /// List service offerings by exact name.
    pub async fn list_service_offerings(&self, name: &str) -> Result<Vec<EntityRef>> {
        let filter = format!("name={name}");
        let output = self.run(&["list", "serviceofferings", &filter]).await?;
        Ok(parse_offering_list(&output)?.offerings)
    }

    /// List virtual machines, optionally narrowed by name. The filter
    /// semantics are CloudStack's own (keyword/prefix match).
    pub async fn list_virtual_machines(&self, name: Option<&str>) -> Result<Vec<VirtualMachineInfo>> {
        let output = match name {
            Some(name) => {
                let filter = format!("name={name}");
                self.run(&["list", "virtualmachines", &filter]).await?
            }
            None => self.run(&["list", "virtualmachines"]).await?,
        };
        Ok(parse_vm_list(&output)?.virtual_machines)
    }

    /// Get one virtual machine by id. `Ok(None)` when the id is
    /// unknown to the management server.
    pub async fn get_virtual_machine(&self, id: &str) -> Result<Option<VirtualMachineInfo>> {
        let filter = format!("id={id}");
        let output = self.run(&["list", "virtualmachines", &filter]).await?;
        Ok(parse_vm_list(&output)?.virtual_machines.into_iter().next())
    }

    /// Deploy a virtual machine from resolved identifiers.
    pub async fn deploy_virtual_machine(
        &self,
        name: &str,
        service_offering_id: &str,
        template_id: &str,
        zone_id: &str,
    ) -> Result<VirtualMachineInfo> {
        let offering = format!("serviceofferingid={service_offering_id}");
        let template = format!("templateid={template_id}");
        let zone = format!("zoneid={zone_id}");
        let vm_name = format!("name={name}");

        let output = self
            .run(&["deploy", "virtualmachine", &offering, &template, &zone, &vm_name])
            .await?;

        parse_deploy_response(&output)?
            .virtual_machine
            .ok_or_else(|| {
                CloudstackError::UnexpectedOutput("deploy response carried no virtualmachine".into())
            })
    }

    /// Update a virtual machine's display name.
    pub async fn update_virtual_machine(&self, id: &str, name: Option<&str>) -> Result<()> {
        let id_arg = format!("id={id}");
        let name_arg = name.map(|n| format!("name={n}"));

        let mut args = vec!["update", "virtualmachine", id_arg.as_str()];
        if let Some(ref name_arg) = name_arg {
            args.push(name_arg.as_str());
        }

        self.run(&args).await?;
        Ok(())
    }
}

/// A (name, id) pair from a list response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EntityRef {
    pub id: String,
    pub name: String,
}

/// Virtual machine record as CloudStack reports it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct VirtualMachineInfo {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub zoneid: String,
    #[serde(default)]
    pub zonename: String,
    #[serde(default)]
    pub templateid: String,
    #[serde(default)]
    pub templatename: String,
    #[serde(default)]
    pub serviceofferingid: String,
    #[serde(default)]
    pub serviceofferingname: String,
}

#[derive(Debug, Default, Deserialize)]
struct ZoneList {
    #[serde(default, rename = "zone")]
    zones: Vec<EntityRef>,
}

#[derive(Debug, Default, Deserialize)]
struct TemplateList {
    #[serde(default, rename = "template")]
    templates: Vec<EntityRef>,
}

#[derive(Debug, Default, Deserialize)]
struct OfferingList {
    #[serde(default, rename = "serviceoffering")]
    offerings: Vec<EntityRef>,
}

#[derive(Debug, Default, Deserialize)]
struct VirtualMachineList {
    #[serde(default, rename = "virtualmachine")]
    virtual_machines: Vec<VirtualMachineInfo>,
}

#[derive(Debug, Default, Deserialize)]
struct DeployResponse {
    #[serde(default, rename = "virtualmachine")]
    virtual_machine: Option<VirtualMachineInfo>,
}

// cmk prints `{}` (or nothing at all) when a list matches nothing.
fn parse_or_default<T: Default + serde::de::DeserializeOwned>(output: &str) -> Result<T> {
    let trimmed = output.trim();
    if trimmed.is_empty() || trimmed == "{}" {
        return Ok(T::default());
    }
    Ok(serde_json::from_str(trimmed)?)
}

fn parse_zone_list(output: &str) -> Result<ZoneList> {
    parse_or_default(output)
}

fn parse_template_list(output: &str) -> Result<TemplateList> {
    parse_or_default(output)
}

fn parse_offering_list(output: &str) -> Result<OfferingList> {
    parse_or_default(output)
}

fn parse_vm_list(output: &str) -> Result<VirtualMachineList> {
    parse_or_default(output)
}

fn parse_deploy_response(output: &str) -> Result<DeployResponse> {
    parse_or_default(output)
}
