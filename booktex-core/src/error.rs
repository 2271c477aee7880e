// Copyright (c) UnnamedOrange. Licensed under the MIT License.
// See the LICENSE file in the repository root for full license text.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The token stream contains a type outside the renderer's vocabulary.
    #[error("no render rule for token type `{0}`")]
    UnknownTokenType(String),
    #[error("cannot render heading tag `{0}`")]
    UnsupportedHeading(String),
    #[error("invalid token stream: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid options: {0}")]
    Config(#[from] serde_yaml::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
