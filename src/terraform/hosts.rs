//! Control-plane host list construction

use crate::cluster::{HostConfig, DEFAULT_SSH_PORT};
use crate::error::{Error, Result};

use super::ControlPlane;

/// Build host records from a control-plane descriptor.
///
/// Public and private addresses are paired by position. When the private list
/// is shorter, the host's private address falls back to its public address.
/// All hosts share the descriptor's SSH settings. Ids are assigned from 0 in
/// list order. A descriptor without public addresses yields no hosts.
///
/// # Errors
///
/// Returns `Error::MalformedField` if `ssh_port` is not a valid port number.
pub fn build_hosts(control_plane: &ControlPlane) -> Result<Vec<HostConfig>> {
    let ssh_port = parse_ssh_port(&control_plane.ssh_port)?;

    let hosts = control_plane
        .public_address
        .iter()
        .enumerate()
        .map(|(id, public_address)| {
            let private_address = control_plane
                .private_address
                .get(id)
                .unwrap_or(public_address);

            HostConfig {
                id,
                public_address: public_address.clone(),
                private_address: private_address.clone(),
                ssh_username: control_plane.ssh_user.clone(),
                ssh_port,
                ssh_private_key_file: control_plane.ssh_private_key_file.clone(),
                ssh_agent_socket: control_plane.ssh_agent_socket.clone(),
            }
        })
        .collect();

    Ok(hosts)
}

fn parse_ssh_port(raw: &str) -> Result<u16> {
    if raw.is_empty() {
        return Ok(DEFAULT_SSH_PORT);
    }

    raw.parse::<u16>().map_err(|e| Error::MalformedField {
        field: "ssh_port".to_string(),
        value: raw.to_string(),
        message: format!("failed to convert ssh port string to int: {}", e),
    })
}
