//! The drawer: a style/font/group context plus chainable draw calls.

use crate::draw::{self, PointRenderer};
use crate::error::FormError;
use crate::player::AnimateId;
use crate::space::SvgSurface;
use kurbo::Point;
use sf_core::{Font, FontUpdate, NodeIndex, StrokeCap, StrokeJoin, Style, StyleValue};

/// A color or class name, or a bare flag: `false` switches the fill /
/// stroke / class off, `true` switches it back on with its current value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Toggle {
    Flag(bool),
    Value(String),
}

impl From<bool> for Toggle {
    fn from(v: bool) -> Self {
        Self::Flag(v)
    }
}

impl From<&str> for Toggle {
    fn from(v: &str) -> Self {
        Self::Value(v.to_string())
    }
}

impl From<String> for Toggle {
    fn from(v: String) -> Self {
        Self::Value(v)
    }
}

/// Drawing state consulted by every draw call.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawContext {
    /// Parent for new elements; `None` means the surface root.
    pub group: Option<NodeIndex>,
    pub group_id: String,
    pub group_count: u64,
    /// `{group_id}-{group_count}` once an id has been advanced.
    pub current_id: Option<String>,
    pub current_class: Option<String>,
    /// `item-{n}` while scoped to a player.
    pub scope_class: Option<String>,
    pub style: Style,
    /// CSS font shorthand derived from the drawer's [`Font`].
    pub font: String,
    pub font_size: f64,
    pub font_family: String,
}

impl Default for DrawContext {
    fn default() -> Self {
        let font = Font::default();
        Self {
            group: None,
            group_id: "pts".into(),
            group_count: 0,
            current_id: None,
            current_class: None,
            scope_class: None,
            style: Style::default(),
            font: font.value(),
            font_size: font.size,
            font_family: font.family,
        }
    }
}

impl DrawContext {
    /// Bump the counter and derive the next element id.
    pub fn advance_id(&mut self) -> &str {
        self.group_count += 1;
        self.current_id
            .insert(format!("{}-{}", self.group_id, self.group_count))
    }

    fn sync_font(&mut self, font: &Font) {
        self.font = font.value();
        self.font_size = font.size;
        self.font_family = font.family.clone();
    }
}

/// A drawer bound to one surface.
///
/// Setters mutate the single [`DrawContext`] in place and return `&mut Self`
/// for chaining. Every draw call consumes exactly one id, so redrawing the
/// same sequence after [`set_group_scope`](Self::set_group_scope) updates the
/// same elements instead of adding new ones.
#[derive(Debug)]
pub struct SvgForm<'s> {
    space: &'s mut SvgSurface,
    ctx: DrawContext,
    font: Font,
}

impl<'s> SvgForm<'s> {
    pub fn new(space: &'s mut SvgSurface) -> Self {
        let group_id = format!("pts_svg_{}", space.group_ids.next_id());
        let ctx = DrawContext {
            group: Some(space.root()),
            group_id,
            ..DrawContext::default()
        };
        Self {
            space,
            ctx,
            font: Font::default(),
        }
    }

    pub fn space(&self) -> &SvgSurface {
        self.space
    }

    pub fn space_mut(&mut self) -> &mut SvgSurface {
        self.space
    }

    pub fn context(&self) -> &DrawContext {
        &self.ctx
    }

    pub fn font(&self) -> &Font {
        &self.font
    }

    // ─── Style & state ───────────────────────────────────────────────────

    pub fn set_fill(&mut self, color: impl Into<Toggle>) -> &mut Self {
        match color.into() {
            Toggle::Flag(on) => self.ctx.style.filled = on,
            Toggle::Value(c) => {
                self.ctx.style.filled = true;
                self.ctx.style.fill = c;
            }
        }
        self
    }

    /// Set the stroke color (or `false`); width, join and cap change only
    /// when given.
    pub fn set_stroke(
        &mut self,
        color: impl Into<Toggle>,
        width: Option<f64>,
        join: Option<StrokeJoin>,
        cap: Option<StrokeCap>,
    ) -> &mut Self {
        let style = &mut self.ctx.style;
        match color.into() {
            Toggle::Flag(false) => {
                style.stroked = false;
                return self;
            }
            Toggle::Flag(true) => style.stroked = true,
            Toggle::Value(c) => {
                style.stroked = true;
                style.stroke = c;
            }
        }
        if let Some(w) = width {
            style.stroke_width = w;
        }
        if let Some(j) = join {
            style.stroke_linejoin = j;
        }
        if let Some(c) = cap {
            style.stroke_linecap = c;
        }
        self
    }

    pub fn set_class(&mut self, class: impl Into<Toggle>) -> &mut Self {
        match class.into() {
            Toggle::Flag(false) => self.ctx.current_class = None,
            Toggle::Flag(true) => {}
            Toggle::Value(c) => self.ctx.current_class = Some(c),
        }
        self
    }

    /// Set a style key by name.
    ///
    /// # Errors
    /// [`StyleError::UnknownKey`](sf_core::StyleError::UnknownKey) for names
    /// outside the style schema, `InvalidValue` for a value of the wrong kind.
    pub fn set_style(
        &mut self,
        key: &str,
        value: impl Into<StyleValue>,
    ) -> Result<&mut Self, FormError> {
        self.ctx.style.set_by_name(key, value.into())?;
        Ok(self)
    }

    /// Change the font size and whichever fields `update` carries.
    pub fn set_font_size(&mut self, size: f64, update: FontUpdate) -> &mut Self {
        self.font.apply(size, update);
        self.ctx.sync_font(&self.font);
        self
    }

    /// Replace the font wholesale.
    pub fn set_font(&mut self, font: Font) -> &mut Self {
        self.font = font;
        self.ctx.sync_font(&self.font);
        self
    }

    /// Back to the default style and a 14px `sans-serif` font.
    pub fn reset(&mut self) -> &mut Self {
        self.ctx.style = Style::default();
        self.set_font(Font::default())
    }

    // ─── Scoping ─────────────────────────────────────────────────────────

    /// Start a new id namespace under `parent` (default: the surface root)
    /// and advance to its first id. Leaves any item scope.
    pub fn set_group_scope(&mut self, group_id: &str, parent: Option<NodeIndex>) -> &DrawContext {
        self.ctx.scope_class = None;
        self.ctx.group = Some(parent.unwrap_or_else(|| self.space.root()));
        self.ctx.group_id = group_id.to_string();
        self.ctx.group_count = 0;
        self.ctx.advance_id();
        &self.ctx
    }

    /// Scope subsequent draws to a player so its elements can be removed as
    /// a batch.
    ///
    /// # Errors
    /// [`FormError::MissingIdentity`] when `item` is `None`.
    pub fn scope_to_item(&mut self, item: Option<AnimateId>) -> Result<&DrawContext, FormError> {
        let item = item.ok_or(FormError::MissingIdentity)?;
        let scope = item.scope_id();
        self.set_group_scope(&scope, None);
        self.ctx.scope_class = Some(scope);
        Ok(&self.ctx)
    }

    pub fn advance_id(&mut self) -> &str {
        self.ctx.advance_id()
    }

    // ─── Drawing ─────────────────────────────────────────────────────────

    pub fn point(
        &mut self,
        center: Point,
        radius: f64,
        shape: &dyn PointRenderer,
    ) -> Result<&mut Self, FormError> {
        self.ctx.advance_id();
        draw::point(self.space, &self.ctx, center, radius, shape)?;
        Ok(self)
    }

    pub fn circle(&mut self, center: Point, radius: f64) -> Result<&mut Self, FormError> {
        self.ctx.advance_id();
        draw::circle(self.space, &self.ctx, center, radius)?;
        Ok(self)
    }

    /// One circle per center, all with radius `radius`.
    pub fn circles(&mut self, centers: &[Point], radius: f64) -> Result<&mut Self, FormError> {
        for c in centers {
            self.circle(*c, radius)?;
        }
        Ok(self)
    }

    pub fn arc(
        &mut self,
        center: Point,
        radius: f64,
        start: f64,
        end: f64,
        cc: bool,
    ) -> Result<&mut Self, FormError> {
        self.ctx.advance_id();
        draw::arc(self.space, &self.ctx, center, radius, start, end, cc)?;
        Ok(self)
    }

    pub fn square(&mut self, center: Point, half: f64) -> Result<&mut Self, FormError> {
        self.ctx.advance_id();
        draw::square(self.space, &self.ctx, center, half)?;
        Ok(self)
    }

    pub fn line(&mut self, points: &[Point]) -> Result<&mut Self, FormError> {
        self.ctx.advance_id();
        draw::line(self.space, &self.ctx, points)?;
        Ok(self)
    }

    pub fn polygon(&mut self, points: &[Point]) -> Result<&mut Self, FormError> {
        self.ctx.advance_id();
        draw::polygon(self.space, &self.ctx, points)?;
        Ok(self)
    }

    pub fn rect(&mut self, points: &[Point]) -> Result<&mut Self, FormError> {
        self.ctx.advance_id();
        draw::rect(self.space, &self.ctx, points)?;
        Ok(self)
    }

    pub fn text(&mut self, at: Point, content: &str) -> Result<&mut Self, FormError> {
        self.ctx.advance_id();
        draw::text(self.space, &self.ctx, at, content)?;
        Ok(self)
    }

    /// Debug overlay text at (10, 14). Leaves the context with a black fill
    /// and a thin white stroke.
    pub fn log(&mut self, message: &str) -> Result<&mut Self, FormError> {
        self.set_fill("#000")
            .set_stroke("#fff", Some(0.5), None, None)
            .text(Point::new(10.0, 14.0), message)
    }

    // ─── Frames ──────────────────────────────────────────────────────────

    /// Let every registered player draw one frame, each scoped to its own
    /// item. Stops at the first player error.
    pub fn play_frame(&mut self, time: f64, ftime: f64) -> Result<&mut Self, FormError> {
        let mut players = self.space.players.begin_frame();
        log::trace!("frame t={time} dt={ftime}: {} players", players.len());

        let result = players.iter_mut().try_for_each(|(id, player)| {
            self.scope_to_item(Some(*id))?;
            player.animate(self, time, ftime)
        });

        self.space.players.end_frame(players);
        self.ctx.scope_class = None;
        result.map(|()| self)
    }
}
