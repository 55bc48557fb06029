//! Local store or remote instance.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use log::info;
use nodemorph_client::{ClientConfig, HttpClient};
use nodemorph_mutation::{MutationExecutor, MutationOperation, MutationSettings, UpdateReport};
use nodemorph_query::{LocalBackend, SearchCriteria, SearchExecutor, SearchResult};
use nodemorph_tree::TreeStore;

use crate::args::TargetArgs;

/// What a command runs against.
pub enum Target {
    /// A JSON snapshot loaded into memory; live updates are written back.
    Local {
        store: TreeStore,
        file: PathBuf,
        settings: MutationSettings,
    },
    Remote(HttpClient),
}

impl Target {
    pub fn open(args: &TargetArgs) -> Result<Self> {
        if let Some(file) = &args.store {
            let store = TreeStore::load(file)
                .with_context(|| format!("Failed to load store {}", file.display()))?;
            let settings = match &args.user {
                Some(user) => MutationSettings::for_user(user.clone()),
                None => MutationSettings::default(),
            };
            return Ok(Self::Local {
                store,
                file: file.clone(),
                settings,
            });
        }

        let mut config = match &args.config {
            Some(path) => ClientConfig::load(path)?,
            None if args.url.is_some() => ClientConfig::default(),
            None => bail!("Specify --store, or --url / --config for a remote instance"),
        };
        if let Some(url) = &args.url {
            config.base_url = url.clone();
        }
        if let Some(user) = &args.user {
            config.user = Some(user.clone());
            config.password = args.password.clone();
        }
        Ok(Self::Remote(HttpClient::new(config)?))
    }

    pub fn search(&self, criteria: &SearchCriteria) -> Result<SearchResult> {
        let result = match self {
            Self::Local { store, .. } => {
                let backend = LocalBackend::new(store);
                SearchExecutor::new(&backend).search(criteria)?
            }
            Self::Remote(client) => SearchExecutor::new(client).search(criteria)?,
        };
        Ok(result)
    }

    pub fn update(&mut self, op: &MutationOperation) -> Result<UpdateReport> {
        match self {
            Self::Local {
                store,
                file,
                settings,
            } => {
                let report = MutationExecutor::with_settings(store, settings.clone()).execute(op)?;
                if !op.dry_run && report.total > 0 {
                    store
                        .save(&*file)
                        .with_context(|| format!("Failed to write store {}", file.display()))?;
                    info!("Saved {}", file.display());
                }
                Ok(report)
            }
            Self::Remote(client) => Ok(client.update(op)?),
        }
    }
}
