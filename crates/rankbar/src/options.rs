#![forbid(unsafe_code)]

//! Chart options and partial updates.

use rankbar_render::Rgba;
use rankbar_style::ThemeName;
use rankbar_widgets::header::{DEFAULT_HEADER, DEFAULT_HEADER_HEIGHT};
use rankbar_widgets::row::DEFAULT_BAR_COLOR;
use rankbar_widgets::{CachePolicy, RowRecord};

/// Default row height.
pub const DEFAULT_ROW_HEIGHT: f64 = 60.0;

/// Sort direction applied to `amount` before rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    /// Lenient parse: `"asc"` and `"desc"` in any case.
    pub fn parse(name: &str) -> Option<Self> {
        if name.eq_ignore_ascii_case("asc") {
            Some(Self::Asc)
        } else if name.eq_ignore_ascii_case("desc") {
            Some(Self::Desc)
        } else {
            None
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Complete chart configuration.
///
/// ```
/// use rankbar::options::{ChartOptions, SortOrder};
///
/// let options = ChartOptions::default().sort(SortOrder::Desc).row_height(48.0);
/// assert_eq!(options.header_height, 40.0);
/// assert_eq!(options.header, ["名称", "金额", "贡献度"]);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, rename_all = "camelCase")
)]
pub struct ChartOptions {
    /// `None` keeps the dataset order.
    pub sort: Option<SortOrder>,
    pub data: Vec<RowRecord>,
    pub theme: ThemeName,
    /// Column titles, paired with the columns in order.
    pub header: Vec<String>,
    /// Bar fill for records without their own color.
    pub color: Rgba,
    pub header_height: f64,
    pub row_height: f64,
    pub cache_policy: CachePolicy,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            sort: None,
            data: Vec::new(),
            theme: ThemeName::default(),
            header: DEFAULT_HEADER.iter().map(|s| (*s).to_owned()).collect(),
            color: DEFAULT_BAR_COLOR,
            header_height: DEFAULT_HEADER_HEIGHT,
            row_height: DEFAULT_ROW_HEIGHT,
            cache_policy: CachePolicy::default(),
        }
    }
}

impl ChartOptions {
    #[must_use]
    pub fn sort(mut self, order: SortOrder) -> Self {
        self.sort = Some(order);
        self
    }

    #[must_use]
    pub fn data(mut self, data: Vec<RowRecord>) -> Self {
        self.data = data;
        self
    }

    #[must_use]
    pub fn theme(mut self, theme: ThemeName) -> Self {
        self.theme = theme;
        self
    }

    #[must_use]
    pub fn header<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.header = labels.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn color(mut self, color: Rgba) -> Self {
        self.color = color;
        self
    }

    #[must_use]
    pub fn header_height(mut self, height: f64) -> Self {
        self.header_height = height;
        self
    }

    #[must_use]
    pub fn row_height(mut self, height: f64) -> Self {
        self.row_height = height;
        self
    }

    #[must_use]
    pub fn cache_policy(mut self, policy: CachePolicy) -> Self {
        self.cache_policy = policy;
        self
    }

    /// Override every field that is set in `patch`.
    pub fn merge(&mut self, patch: ChartOptionsPatch) {
        let ChartOptionsPatch {
            sort,
            data,
            theme,
            header,
            color,
            header_height,
            row_height,
            cache_policy,
        } = patch;
        if let Some(sort) = sort {
            self.sort = sort;
        }
        if let Some(data) = data {
            self.data = data;
        }
        if let Some(theme) = theme {
            self.theme = theme;
        }
        if let Some(header) = header {
            self.header = header;
        }
        if let Some(color) = color {
            self.color = color;
        }
        if let Some(height) = header_height {
            self.header_height = height;
        }
        if let Some(height) = row_height {
            self.row_height = height;
        }
        if let Some(policy) = cache_policy {
            self.cache_policy = policy;
        }
    }

    /// `self` with `patch` applied.
    #[must_use]
    pub fn merged(mut self, patch: ChartOptionsPatch) -> Self {
        self.merge(patch);
        self
    }
}

/// A partial [`ChartOptions`]: unset fields leave the current value alone.
///
/// `sort` is doubly optional so a patch can clear the sort order
/// (`Some(None)`) as well as leave it untouched (`None`).
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, rename_all = "camelCase")
)]
pub struct ChartOptionsPatch {
    pub sort: Option<Option<SortOrder>>,
    pub data: Option<Vec<RowRecord>>,
    pub theme: Option<ThemeName>,
    pub header: Option<Vec<String>>,
    pub color: Option<Rgba>,
    pub header_height: Option<f64>,
    pub row_height: Option<f64>,
    pub cache_policy: Option<CachePolicy>,
}

impl ChartOptionsPatch {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn sort(mut self, order: Option<SortOrder>) -> Self {
        self.sort = Some(order);
        self
    }

    #[must_use]
    pub fn data(mut self, data: Vec<RowRecord>) -> Self {
        self.data = Some(data);
        self
    }

    #[must_use]
    pub fn theme(mut self, theme: ThemeName) -> Self {
        self.theme = Some(theme);
        self
    }

    #[must_use]
    pub fn header<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.header = Some(labels.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn color(mut self, color: Rgba) -> Self {
        self.color = Some(color);
        self
    }

    #[must_use]
    pub fn header_height(mut self, height: f64) -> Self {
        self.header_height = Some(height);
        self
    }

    #[must_use]
    pub fn row_height(mut self, height: f64) -> Self {
        self.row_height = Some(height);
        self
    }

    #[must_use]
    pub fn cache_policy(mut self, policy: CachePolicy) -> Self {
        self.cache_policy = Some(policy);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
