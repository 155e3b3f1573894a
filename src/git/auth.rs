//! Git authentication for fetch and push
//!
//! Credentials are delegated to git's own mechanisms:
//! - ssh-agent, then the usual keys in `~/.ssh/`
//! - configured credential helpers
//! - anonymous access for public HTTPS remotes

use git2::{Cred, CredentialType, Error, ErrorClass, ErrorCode, RemoteCallbacks};

const SSH_KEY_NAMES: &[&str] = &["id_ed25519", "id_rsa", "id_ecdsa"];

fn auth_error(message: &str) -> Error {
    Error::new(ErrorCode::Auth, ErrorClass::Http, message)
}

fn ssh_key_from_home(username: &str) -> Result<Cred, Error> {
    let ssh_dir = dirs::home_dir().unwrap_or_default().join(".ssh");

    SSH_KEY_NAMES
        .iter()
        .map(|name| (ssh_dir.join(name), ssh_dir.join(format!("{name}.pub"))))
        .filter(|(private_key, _)| private_key.exists())
        .find_map(|(private_key, public_key)| {
            let public_key = public_key.exists().then_some(public_key.as_path());
            Cred::ssh_key(username, public_key, &private_key, None).ok()
        })
        .ok_or_else(|| auth_error("no usable SSH key found"))
}

fn ssh_credentials(username_from_url: Option<&str>) -> Result<Cred, Error> {
    let username = username_from_url.unwrap_or("git");
    Cred::ssh_key_from_agent(username).or_else(|_| ssh_key_from_home(username))
}

fn userpass_credentials(url: &str, username_from_url: Option<&str>) -> Result<Cred, Error> {
    let config = git2::Config::open_default().or_else(|_| git2::Config::new())?;

    if let Ok(cred) = Cred::credential_helper(&config, url, username_from_url) {
        return Ok(cred);
    }

    // Anonymous attempt lets the server report the real error
    let candidates = [username_from_url.unwrap_or(""), "git", "anonymous"];
    candidates
        .iter()
        .find_map(|user| Cred::userpass_plaintext(user, "").ok())
        .ok_or_else(|| auth_error("authentication failed"))
}

/// Install the credential callback on a set of remote callbacks
pub fn setup_auth_callbacks(callbacks: &mut RemoteCallbacks<'_>) {
    callbacks.credentials(|url, username_from_url, allowed| {
        log::debug!("Credentials requested for {url} ({allowed:?})");

        if allowed.contains(CredentialType::DEFAULT) {
            Cred::default()
        } else if allowed.contains(CredentialType::SSH_KEY) {
            ssh_credentials(username_from_url)
        } else if allowed.contains(CredentialType::USER_PASS_PLAINTEXT) {
            userpass_credentials(url, username_from_url)
        } else {
            Err(auth_error("no supported authentication method"))
        }
    });
}
