//! Signer setup: a held key, optionally behind an interactive approval prompt.

use anyhow::{Context, Result};
use dialoguer::{Confirm, Password};
use market_wallets::{KeyPair, LocalSigner, SignRequest, SignerGateway, WalletBridge};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::warn;

/// Loads the signing key from the argument/environment, or prompts for it
pub fn load_key(secret: Option<&str>) -> Result<KeyPair> {
    let secret = match secret {
        Some(secret) => secret.to_string(),
        None => Password::new()
            .with_prompt("Secret key (hex)")
            .interact()
            .context("no secret key given and prompt failed")?,
    };
    KeyPair::from_secret_hex(&secret).context("invalid secret key")
}

/// Builds the signer gateway. In interactive mode every request is shown
/// and must be confirmed before it is signed.
pub fn signer(
    key: KeyPair,
    interactive: bool,
    passphrase: &str,
) -> (Arc<dyn SignerGateway>, Option<JoinHandle<()>>) {
    if !interactive {
        return (Arc::new(LocalSigner::new(key)), None);
    }
    let (bridge, requests) = WalletBridge::channel(passphrase, 1);
    let prompt = spawn_prompt(requests, key);
    (Arc::new(bridge), Some(prompt))
}

pub fn describe_request(request: &SignRequest) -> String {
    match request.envelope().body() {
        Ok(body) => format!(
            "Sign `{}` on {} (fee {}, seq {})? [{}]",
            body.invocation.method,
            body.invocation.contract,
            body.fee,
            body.sequence,
            request.hash()
        ),
        Err(_) => format!("Sign transaction {}?", request.hash()),
    }
}

fn spawn_prompt(mut requests: mpsc::Receiver<SignRequest>, key: KeyPair) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(request) = requests.recv().await {
            let prompt = describe_request(&request);
            let approved = tokio::task::spawn_blocking(move || {
                Confirm::new()
                    .with_prompt(prompt)
                    .default(false)
                    .interact()
                    .unwrap_or(false)
            })
            .await
            .unwrap_or_else(|err| {
                warn!(target: "market::cli", error = %err, "confirmation prompt failed");
                false
            });

            if approved {
                request.approve(&key);
            } else {
                request.reject();
            }
        }
    })
}
