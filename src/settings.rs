use super::*;

//
// Settings
//

/// Resolved settings for one exhibit, read-only once built.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderSettings {
    pub border: u32,
    pub padding: u32,
    pub fontfile: Option<PathBuf>,
    pub fontsize: u32,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl RenderSettings {
    pub fn from_overrides(overrides: Overrides) -> Self {
        fn or_zero(name: &str, value: Option<u32>) -> u32 {
            value.unwrap_or_else(|| {
                debug!("No {name} given, using 0");
                0
            })
        }

        let settings = Self {
            border: or_zero("border", overrides.border),
            padding: or_zero("padding", overrides.padding),
            fontfile: overrides.fontfile,
            fontsize: or_zero("fontsize", overrides.fontsize),
            width: overrides.width,
            height: overrides.height,
        };
        if settings.has_invisible_font() {
            warn!("Font size is 0, text drawn with a font file will be invisible");
        }
        settings
    }

    /// A font file at size 0 measures and draws nothing.
    pub fn has_invisible_font(&self) -> bool {
        self.fontfile.is_some() && self.fontsize == 0
    }

    /// Size comes purely from the text when no dimension is pinned.
    pub fn is_auto_scale(&self) -> bool {
        self.width.is_none() && self.height.is_none()
    }
}

//
// Overrides
//

// Note: `Overrides` comes from command line flags or a config file, every
// field may be missing. `RenderSettings` is the value used at runtime.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields, default)]
pub struct Overrides {
    pub border: Option<u32>,
    pub padding: Option<u32>,
    pub fontfile: Option<PathBuf>,
    pub fontsize: Option<u32>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl Overrides {
    /// Fills fields missing from `self` with the ones in `fallback`.
    #[must_use]
    pub fn or(self, fallback: Self) -> Self {
        Self {
            border: self.border.or(fallback.border),
            padding: self.padding.or(fallback.padding),
            fontfile: self.fontfile.or(fallback.fontfile),
            fontsize: self.fontsize.or(fallback.fontsize),
            width: self.width.or(fallback.width),
            height: self.height.or(fallback.height),
        }
    }
}

//
// Config files
//

pub fn read_from_file<P, T>(path: P) -> Result<T>
where
    P: AsRef<Path>,
    T: DeserializeOwned,
{
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("Opening config {}", path.display()))?;
    from_reader(BufReader::new(file)).with_context(|| format!("Parsing config {}", path.display()))
}

pub fn from_reader<R, T>(reader: R) -> Result<T>
where
    R: std::io::Read,
    T: DeserializeOwned,
{
    Ok(ron::de::from_reader(reader)?)
}

//
// Tests
//
