//! Fixed property tables that route style keys to animation drivers.
//!
//! The fast-driver table is an inclusion list: only the keys it names run on
//! the fast driver. The static and general tables are exclusion lists: any
//! key they do not name, including unknown ones, lands in that bucket.
//!
//! The `is_*_property` predicates are the tables; the exported name lists
//! mirror them for inspection.

use std::fmt;

use crate::flatten::is_numeric_key;

/// Geometry, position and compositing keys that the fast driver can update
/// without a round trip through application logic.
pub const FAST_DRIVER_SET: &[&str] = &[
    "opacity",
    "transform",
    "flex",
    "flexGrow",
    "flexShrink",
    "flexBasis",
    "alignSelf",
    "position",
    "top",
    "right",
    "bottom",
    "left",
    "start",
    "end",
    "width",
    "height",
    "minWidth",
    "minHeight",
    "maxWidth",
    "maxHeight",
    "margin",
    "marginTop",
    "marginRight",
    "marginBottom",
    "marginLeft",
    "marginHorizontal",
    "marginVertical",
    "marginStart",
    "marginEnd",
    "aspectRatio",
    "zIndex",
];

/// Keys kept off the original component in addition to [`FAST_DRIVER_SET`].
/// These are painted by the general-driver container instead.
pub const STATIC_EXCLUDE_EXTRAS: &[&str] = &[
    "backgroundColor",
    "borderColor",
    "borderTopColor",
    "borderRightColor",
    "borderBottomColor",
    "borderLeftColor",
    "borderStartColor",
    "borderEndColor",
    "borderWidth",
    "borderTopWidth",
    "borderRightWidth",
    "borderBottomWidth",
    "borderLeftWidth",
    "borderStartWidth",
    "borderEndWidth",
    "borderStyle",
    "borderRadius",
    "borderTopLeftRadius",
    "borderTopRightRadius",
    "borderBottomLeftRadius",
    "borderBottomRightRadius",
    "borderTopStartRadius",
    "borderTopEndRadius",
    "borderBottomStartRadius",
    "borderBottomEndRadius",
    "borderCurve",
    "shadowColor",
    "shadowOffset",
    "shadowOpacity",
    "shadowRadius",
    "elevation",
];

/// Keys kept off the general-driver container in addition to
/// [`FAST_DRIVER_SET`]: child layout, padding and text/content keys that only
/// mean something on the original component.
///
/// `overflow` is listed because that container always clips.
pub const GENERAL_EXCLUDE_EXTRAS: &[&str] = &[
    "overflow",
    "textAlign",
    "padding",
    "paddingTop",
    "paddingRight",
    "paddingBottom",
    "paddingLeft",
    "paddingHorizontal",
    "paddingVertical",
    "paddingStart",
    "paddingEnd",
    "flexDirection",
    "flexWrap",
    "alignItems",
    "alignContent",
    "justifyContent",
    "display",
    "direction",
    "color",
    "fontFamily",
    "fontSize",
    "fontStyle",
    "fontWeight",
    "fontVariant",
    "letterSpacing",
    "lineHeight",
    "textAlignVertical",
    "textDecorationLine",
    "textDecorationStyle",
    "textDecorationColor",
    "textTransform",
    "textShadowColor",
    "textShadowOffset",
    "textShadowRadius",
    "includeFontPadding",
    "writingDirection",
    "tintColor",
    "resizeMode",
    "objectFit",
];

/// One of the three destinations a style key can be routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    FastDriver,
    GeneralDriver,
    Static,
}

impl Bucket {
    pub const ALL: [Bucket; 3] = [Bucket::FastDriver, Bucket::GeneralDriver, Bucket::Static];

    pub fn as_str(self) -> &'static str {
        match self {
            Bucket::FastDriver => "fast_driver",
            Bucket::GeneralDriver => "general_driver",
            Bucket::Static => "static",
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The buckets a single key lands in. Not a partition: a key can be in
/// several buckets or none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BucketSet {
    bits: u8,
}

impl BucketSet {
    fn bit(bucket: Bucket) -> u8 {
        match bucket {
            Bucket::FastDriver => 0b001,
            Bucket::GeneralDriver => 0b010,
            Bucket::Static => 0b100,
        }
    }

    pub fn insert(&mut self, bucket: Bucket) {
        self.bits |= Self::bit(bucket);
    }

    pub fn contains(&self, bucket: Bucket) -> bool {
        self.bits & Self::bit(bucket) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = Bucket> + '_ {
        Bucket::ALL.into_iter().filter(|b| self.contains(*b))
    }
}

pub fn is_fast_driver_property(name: &str) -> bool {
    matches!(
        name,
        "opacity"
            | "transform"
            | "flex"
            | "flexGrow"
            | "flexShrink"
            | "flexBasis"
            | "alignSelf"
            | "position"
            | "top"
            | "right"
            | "bottom"
            | "left"
            | "start"
            | "end"
            | "width"
            | "height"
            | "minWidth"
            | "minHeight"
            | "maxWidth"
            | "maxHeight"
            | "margin"
            | "marginTop"
            | "marginRight"
            | "marginBottom"
            | "marginLeft"
            | "marginHorizontal"
            | "marginVertical"
            | "marginStart"
            | "marginEnd"
            | "aspectRatio"
            | "zIndex"
    )
}

pub fn is_static_excluded_property(name: &str) -> bool {
    is_fast_driver_property(name)
        || matches!(
            name,
            "backgroundColor"
                | "borderColor"
                | "borderTopColor"
                | "borderRightColor"
                | "borderBottomColor"
                | "borderLeftColor"
                | "borderStartColor"
                | "borderEndColor"
                | "borderWidth"
                | "borderTopWidth"
                | "borderRightWidth"
                | "borderBottomWidth"
                | "borderLeftWidth"
                | "borderStartWidth"
                | "borderEndWidth"
                | "borderStyle"
                | "borderRadius"
                | "borderTopLeftRadius"
                | "borderTopRightRadius"
                | "borderBottomLeftRadius"
                | "borderBottomRightRadius"
                | "borderTopStartRadius"
                | "borderTopEndRadius"
                | "borderBottomStartRadius"
                | "borderBottomEndRadius"
                | "borderCurve"
                | "shadowColor"
                | "shadowOffset"
                | "shadowOpacity"
                | "shadowRadius"
                | "elevation"
        )
}

pub fn is_general_excluded_property(name: &str) -> bool {
    is_fast_driver_property(name)
        || matches!(
            name,
            "overflow"
                | "textAlign"
                | "padding"
                | "paddingTop"
                | "paddingRight"
                | "paddingBottom"
                | "paddingLeft"
                | "paddingHorizontal"
                | "paddingVertical"
                | "paddingStart"
                | "paddingEnd"
                | "flexDirection"
                | "flexWrap"
                | "alignItems"
                | "alignContent"
                | "justifyContent"
                | "display"
                | "direction"
                | "color"
                | "fontFamily"
                | "fontSize"
                | "fontStyle"
                | "fontWeight"
                | "fontVariant"
                | "letterSpacing"
                | "lineHeight"
                | "textAlignVertical"
                | "textDecorationLine"
                | "textDecorationStyle"
                | "textDecorationColor"
                | "textTransform"
                | "textShadowColor"
                | "textShadowOffset"
                | "textShadowRadius"
                | "includeFontPadding"
                | "writingDirection"
                | "tintColor"
                | "resizeMode"
                | "objectFit"
        )
}

/// The three property tables behind the bucket predicates.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClassificationTable;

impl ClassificationTable {
    /// Process-wide table. Stateless; the tables are compiled in.
    pub fn global() -> &'static ClassificationTable {
        static TABLE: ClassificationTable = ClassificationTable;
        &TABLE
    }

    pub fn in_fast_driver_set(&self, key: &str) -> bool {
        is_fast_driver_property(key)
    }

    pub fn in_static_exclude_set(&self, key: &str) -> bool {
        is_static_excluded_property(key)
    }

    pub fn in_general_exclude_set(&self, key: &str) -> bool {
        is_general_excluded_property(key)
    }

    /// Table predicate for one bucket. Does not look at numeric keys; see
    /// [`classify_key`] and [`crate::filter_style`].
    pub fn admits(&self, bucket: Bucket, key: &str) -> bool {
        match bucket {
            Bucket::FastDriver => self.in_fast_driver_set(key),
            Bucket::GeneralDriver => !self.in_general_exclude_set(key),
            Bucket::Static => !self.in_static_exclude_set(key),
        }
    }
}

/// Every bucket `key` is routed to. Numeric keys go nowhere.
pub fn classify_key(key: &str) -> BucketSet {
    let mut set = BucketSet::default();
    if is_numeric_key(key) {
        return set;
    }
    let table = ClassificationTable::global();
    for bucket in Bucket::ALL {
        if table.admits(bucket, key) {
            set.insert(bucket);
        }
    }
    set
}
