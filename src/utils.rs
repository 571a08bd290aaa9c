use std::{fmt, str::FromStr};

/// Audio quality levels accepted by the song-url endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Quality {
    Standard,
    Exhigh,
    Lossless,
    Hires,
    Sky,
    Jyeffect,
    Jymaster,
}

impl Quality {
    pub const ALL: [Quality; 7] = [
        Quality::Standard,
        Quality::Exhigh,
        Quality::Lossless,
        Quality::Hires,
        Quality::Sky,
        Quality::Jyeffect,
        Quality::Jymaster,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Quality::Standard => "standard",
            Quality::Exhigh => "exhigh",
            Quality::Lossless => "lossless",
            Quality::Hires => "hires",
            Quality::Sky => "sky",
            Quality::Jyeffect => "jyeffect",
            Quality::Jymaster => "jymaster",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Quality::Standard => "Standard",
            Quality::Exhigh => "Extreme high",
            Quality::Lossless => "Lossless",
            Quality::Hires => "Hi-Res",
            Quality::Sky => "Immersive surround",
            Quality::Jyeffect => "HD surround",
            Quality::Jymaster => "Master",
        }
    }

    /// Membership tier the upstream service requires for this level.
    pub fn membership(&self) -> &'static str {
        match self {
            Quality::Sky | Quality::Jymaster => "SVIP",
            _ => "VIP",
        }
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Quality {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Quality::ALL
            .into_iter()
            .find(|q| q.as_str() == needle)
            .ok_or_else(|| {
                format!(
                    "invalid quality level: {s} (expected one of: {})",
                    Quality::ALL.map(|q| q.as_str()).join(", ")
                )
            })
    }
}

/// Human-readable label for a level string as returned by the API.
pub fn quality_label(level: &str) -> &'static str {
    level
        .parse::<Quality>()
        .map(|q| q.label())
        .unwrap_or("Unknown quality")
}

/// clap value parser for `--quality`.
pub fn parse_quality(s: &str) -> Result<Quality, String> {
    s.parse()
}

/// How the `resolve` command prints a resolved track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Text,
    Down,
    Json,
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OutputMode::Text => "text",
            OutputMode::Down => "down",
            OutputMode::Json => "json",
        };
        f.write_str(s)
    }
}

impl FromStr for OutputMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(OutputMode::Text),
            "down" => Ok(OutputMode::Down),
            "json" => Ok(OutputMode::Json),
            other => Err(format!(
                "invalid output mode: {other} (expected text, down or json)"
            )),
        }
    }
}

pub fn parse_output_mode(s: &str) -> Result<OutputMode, String> {
    s.parse()
}

/// Replaces path separators so a name never introduces a sub-directory.
pub fn sanitize_name(name: &str) -> String {
    name.replace(['/', '\\'], "_")
}

/// File name of a downloaded track: `<artist> - <title>.mp3`.
pub fn song_file_name(title: &str, artist: &str) -> String {
    format!("{} - {}.mp3", sanitize_name(artist), sanitize_name(title))
}

/// Formats a byte count with two decimals, stepping units by 1024.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 6] = ["B", "KB", "MB", "GB", "TB", "PB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.2}{}", UNITS[unit])
}

/// Extracts the song id from a `music.163.com` URL; any other input is
/// returned unchanged.
pub fn parse_song_id(input: &str) -> String {
    let input = input.trim();
    if input.contains("music.163.com") {
        if let Some(index) = input.find("id=") {
            return input[index + 3..]
                .split('&')
                .next()
                .unwrap_or_default()
                .to_string();
        }
    }
    input.to_string()
}

/// Accepts URLs that start with `http` and contain a dot.
pub fn is_download_url(url: &str) -> bool {
    url.starts_with("http") && url.contains('.')
}

/// Rewrites the first `http://` to `https://`.
pub fn https_url(url: &str) -> String {
    url.replacen("http://", "https://", 1)
}
