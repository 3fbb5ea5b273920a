//! Function-call contract for the assistant: a function name plus string
//! arguments in, a human-readable string out.

use std::collections::HashMap;

use serde::Serialize;
use thiserror::Error;

use crate::{coordinator::Coordinator, spotify::auth::Authorize};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    PlayContent { title: String },
    Resume,
    Pause,
    SearchTracks { query: String },
    QueueContent { title: String },
    Devices,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Fonction inconnue : {0}")]
    UnknownFunction(String),

    #[error("Argument manquant pour {function} : {argument}")]
    MissingArgument {
        function: &'static str,
        argument: &'static str,
    },
}

/// Function schema handed to the LLM function-calling layer.
#[derive(Debug, Clone, Serialize)]
pub struct FunctionSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub parameters: Vec<ParameterSpec>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParameterSpec {
    pub name: &'static str,
    pub description: &'static str,
}

pub fn functions() -> Vec<FunctionSpec> {
    vec![
        FunctionSpec {
            name: "PlayContent",
            description: "Joue un titre de musique",
            parameters: vec![ParameterSpec {
                name: "title",
                description: "Le titre d'une musique à jouer",
            }],
        },
        FunctionSpec {
            name: "Pause",
            description: "Met en pause la musique",
            parameters: Vec::new(),
        },
        FunctionSpec {
            name: "Resume",
            description: "Lance le lecteur de musique avec celle en cours",
            parameters: Vec::new(),
        },
        FunctionSpec {
            name: "SearchTracks",
            description: "Récupère une liste de titres de musique correspondant à une recherche",
            parameters: vec![ParameterSpec {
                name: "query",
                description: "Le terme de recherche",
            }],
        },
        FunctionSpec {
            name: "QueueContent",
            description: "Ajoute un titre de musique à la file d'attente",
            parameters: vec![ParameterSpec {
                name: "title",
                description: "Le titre d'une musique à ajouter",
            }],
        },
        FunctionSpec {
            name: "Devices",
            description: "Liste les appareils de lecture disponibles",
            parameters: Vec::new(),
        },
    ]
}

impl Command {
    pub fn parse(name: &str, args: &HashMap<String, String>) -> Result<Self, CommandError> {
        let arg = |function: &'static str, argument: &'static str| {
            args.get(argument)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(str::to_string)
                .ok_or(CommandError::MissingArgument { function, argument })
        };

        match name {
            "PlayContent" => Ok(Command::PlayContent {
                title: arg("PlayContent", "title")?,
            }),
            "Resume" => Ok(Command::Resume),
            "Pause" => Ok(Command::Pause),
            "SearchTracks" => Ok(Command::SearchTracks {
                query: arg("SearchTracks", "query")?,
            }),
            "QueueContent" => Ok(Command::QueueContent {
                title: arg("QueueContent", "title")?,
            }),
            "Devices" => Ok(Command::Devices),
            other => Err(CommandError::UnknownFunction(other.to_string())),
        }
    }
}

impl<A: Authorize> Coordinator<A> {
    pub async fn execute(&self, command: Command) -> String {
        tracing::debug!(?command, "executing command");
        match command {
            Command::PlayContent { title } => self.play_track_by_name(&title).await,
            Command::Resume => self.resume().await,
            Command::Pause => self.pause().await,
            Command::SearchTracks { query } => self.search_tracks(&query).await,
            Command::QueueContent { title } => self.queue_track_by_name(&title).await,
            Command::Devices => self.devices().await,
        }
    }

    /// Parses and runs one function call. Always answers with a string.
    pub async fn invoke(&self, name: &str, args: &HashMap<String, String>) -> String {
        match Command::parse(name, args) {
            Ok(command) => self.execute(command).await,
            Err(e) => {
                tracing::warn!(function = name, error = %e, "rejected function call");
                e.to_string()
            }
        }
    }
}
