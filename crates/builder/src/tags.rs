//! The known tag set and one construction function per tag.
//!
//! Every function here goes through the memoized builder for its tag, so
//! `tags::div(attrs, children)` and `builder_for(TagName::Div)(...)` are the
//! same call.

use crate::cache::builder_for;
use crate::children::Children;
use crate::error::{BuildError, UnknownTag};
use crate::value::AttributeBag;
use dom::{Namespace, NodeRef};
use std::fmt;
use std::str::FromStr;

macro_rules! known_tags {
    ($( $variant:ident $ns:ident $name:literal $func:ident; )*) => {
        /// A tag from the known set. HTML names are lowercase, SVG names keep
        /// their camelCase spelling.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum TagName {
            $($variant,)*
        }

        impl TagName {
            pub const ALL: &'static [TagName] = &[$(TagName::$variant,)*];

            pub fn as_str(self) -> &'static str {
                match self {
                    $(TagName::$variant => $name,)*
                }
            }

            pub fn namespace(self) -> Namespace {
                match self {
                    $(TagName::$variant => Namespace::$ns,)*
                }
            }
        }

        $(
            #[doc = concat!("Builds a `<", $name, ">` element.")]
            pub fn $func(
                attributes: impl Into<Option<AttributeBag>>,
                children: impl Into<Children>,
            ) -> Result<NodeRef, BuildError> {
                builder_for(TagName::$variant)(attributes.into(), children.into())
            }
        )*
    };
}

known_tags! {
    A Html "a" a;
    Abbr Html "abbr" abbr;
    Address Html "address" address;
    Area Html "area" area;
    Article Html "article" article;
    Aside Html "aside" aside;
    Audio Html "audio" audio;
    B Html "b" b;
    Base Html "base" base;
    Bdi Html "bdi" bdi;
    Bdo Html "bdo" bdo;
    Blockquote Html "blockquote" blockquote;
    Body Html "body" body;
    Br Html "br" br;
    Button Html "button" button;
    Canvas Html "canvas" canvas;
    Caption Html "caption" caption;
    Cite Html "cite" cite;
    Code Html "code" code;
    Col Html "col" col;
    Colgroup Html "colgroup" colgroup;
    Data Html "data" data;
    Datalist Html "datalist" datalist;
    Dd Html "dd" dd;
    Del Html "del" del;
    Details Html "details" details;
    Dfn Html "dfn" dfn;
    Dialog Html "dialog" dialog;
    Div Html "div" div;
    Dl Html "dl" dl;
    Dt Html "dt" dt;
    Em Html "em" em;
    Embed Html "embed" embed;
    Fieldset Html "fieldset" fieldset;
    Figcaption Html "figcaption" figcaption;
    Figure Html "figure" figure;
    Footer Html "footer" footer;
    Form Html "form" form;
    H1 Html "h1" h1;
    H2 Html "h2" h2;
    H3 Html "h3" h3;
    H4 Html "h4" h4;
    H5 Html "h5" h5;
    H6 Html "h6" h6;
    Head Html "head" head;
    Header Html "header" header;
    Hgroup Html "hgroup" hgroup;
    Hr Html "hr" hr;
    Html Html "html" html;
    I Html "i" i;
    Iframe Html "iframe" iframe;
    Img Html "img" img;
    Input Html "input" input;
    Ins Html "ins" ins;
    Kbd Html "kbd" kbd;
    Label Html "label" label;
    Legend Html "legend" legend;
    Li Html "li" li;
    Link Html "link" link;
    Main Html "main" main;
    Map Html "map" map;
    Mark Html "mark" mark;
    Menu Html "menu" menu;
    Meta Html "meta" meta;
    Meter Html "meter" meter;
    Nav Html "nav" nav;
    Noscript Html "noscript" noscript;
    Object Html "object" object;
    Ol Html "ol" ol;
    Optgroup Html "optgroup" optgroup;
    Option Html "option" option;
    Output Html "output" output;
    P Html "p" p;
    Picture Html "picture" picture;
    Pre Html "pre" pre;
    Progress Html "progress" progress;
    Q Html "q" q;
    Rp Html "rp" rp;
    Rt Html "rt" rt;
    Ruby Html "ruby" ruby;
    S Html "s" s;
    Samp Html "samp" samp;
    Script Html "script" script;
    Search Html "search" search;
    Section Html "section" section;
    Select Html "select" select;
    Slot Html "slot" slot;
    Small Html "small" small;
    Source Html "source" source;
    Span Html "span" span;
    Strong Html "strong" strong;
    Style Html "style" style;
    Sub Html "sub" sub;
    Summary Html "summary" summary;
    Sup Html "sup" sup;
    Table Html "table" table;
    Tbody Html "tbody" tbody;
    Td Html "td" td;
    Template Html "template" template;
    Textarea Html "textarea" textarea;
    Tfoot Html "tfoot" tfoot;
    Th Html "th" th;
    Thead Html "thead" thead;
    Time Html "time" time;
    Title Html "title" title;
    Tr Html "tr" tr;
    Track Html "track" track;
    U Html "u" u;
    Ul Html "ul" ul;
    Var Html "var" var;
    Video Html "video" video;
    Wbr Html "wbr" wbr;
    Svg Svg "svg" svg;
    G Svg "g" g;
    Path Svg "path" path;
    Circle Svg "circle" circle;
    Ellipse Svg "ellipse" ellipse;
    Line Svg "line" line;
    Polyline Svg "polyline" polyline;
    Polygon Svg "polygon" polygon;
    Rect Svg "rect" rect;
    Text Svg "text" text;
    Tspan Svg "tspan" tspan;
    Defs Svg "defs" defs;
    Use Svg "use" use_;
    Symbol Svg "symbol" symbol;
    LinearGradient Svg "linearGradient" linear_gradient;
    RadialGradient Svg "radialGradient" radial_gradient;
    Stop Svg "stop" stop;
    ClipPath Svg "clipPath" clip_path;
    Mask Svg "mask" mask;
    Image Svg "image" image;
    ForeignObject Svg "foreignObject" foreign_object;
}

impl FromStr for TagName {
    type Err = UnknownTag;

    /// HTML names match case-insensitively, SVG names exactly.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TagName::ALL
            .iter()
            .copied()
            .find(|tag| match tag.namespace() {
                Namespace::Html => tag.as_str().eq_ignore_ascii_case(s),
                Namespace::Svg => tag.as_str() == s,
            })
            .ok_or_else(|| UnknownTag(s.to_string()))
    }
}

impl fmt::Display for TagName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
