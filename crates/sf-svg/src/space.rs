//! SVG surface: owns the document, the root `svg` element and its container.

use crate::config::SurfaceConfig;
use crate::error::SurfaceError;
use crate::form::SvgForm;
use crate::markup::to_markup;
use crate::player::{AnimateId, Player, PlayerRegistry};
use kurbo::Size;
use sf_core::css::merge_declaration;
use sf_core::geom::fmt_num;
use sf_core::{Document, DomError, DomNode, IdSequence, Namespace, NodeIndex, SVG_NS};

/// Where a surface attaches itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceTarget {
    /// An existing element. An `svg` element becomes the drawing root;
    /// anything else gets a root `svg` child.
    Element(NodeIndex),
    /// An element id, with or without a leading `#`. Missing ids get a fresh
    /// container pair under `body`.
    Selector(String),
    /// A fresh container pair under `body`, named after the config id.
    Default,
}

/// Owner of the root drawable element and its lifecycle.
#[derive(Debug)]
pub struct SvgSurface {
    document: Document,
    id: String,
    container: Option<NodeIndex>,
    root: NodeIndex,
    bound: Size,
    background: Option<String>,
    pub(crate) players: PlayerRegistry,
    pub(crate) group_ids: IdSequence,
    pub(crate) dom_ids: IdSequence,
}

impl SvgSurface {
    /// Attach a surface to `document` using the process-wide id sequences.
    pub fn new(
        document: Document,
        target: SurfaceTarget,
        config: &SurfaceConfig,
    ) -> Result<Self, SurfaceError> {
        Self::with_id_sequences(
            document,
            target,
            config,
            IdSequence::global_groups(),
            IdSequence::global_dom(),
        )
    }

    /// Attach a surface with injected id sequences. `group_ids` numbers the
    /// forms created from this surface, `dom_ids` the fallback element ids.
    pub fn with_id_sequences(
        mut document: Document,
        target: SurfaceTarget,
        config: &SurfaceConfig,
        group_ids: IdSequence,
        dom_ids: IdSequence,
    ) -> Result<Self, SurfaceError> {
        let (id, found) = match target {
            SurfaceTarget::Element(idx) => {
                let node = document.node(idx).ok_or(DomError::UnknownNode(idx))?;
                if !node.is_element() {
                    return Err(SurfaceError::NotAnElement(idx));
                }
                ("pts_existing_space".to_string(), Some(idx))
            }
            SurfaceTarget::Selector(selector) => {
                let id = selector.trim_start_matches('#').to_string();
                let found = document.get_element_by_id(&id);
                (id, found)
            }
            SurfaceTarget::Default => (config.id.clone(), None),
        };

        let canvas = match found {
            Some(idx) => idx,
            None => {
                let body = document.body();
                let outer = document.create_element(body, "div", Namespace::Html)?;
                document.set_id(outer, &format!("{id}_container"))?;
                let canvas = document.create_element(outer, "div", Namespace::Html)?;
                document.set_id(canvas, &id)?;
                canvas
            }
        };

        let canvas_is_svg = document.node(canvas).and_then(DomNode::tag) == Some("svg");
        let (root, container) = if canvas_is_svg {
            let parent = document
                .parent(canvas)
                .filter(|p| document.node(*p).is_some_and(DomNode::is_element));
            (canvas, parent)
        } else {
            let root =
                Self::create_root_child_element(&mut document, canvas, "svg", &format!("{id}_svg"))?;
            (root, Some(canvas))
        };
        log::debug!("svg surface `{id}` attached: root {root:?}, container {container:?}");

        let mut surface = Self {
            document,
            id,
            container,
            root,
            bound: Size::ZERO,
            background: None,
            players: PlayerRegistry::default(),
            group_ids,
            dom_ids,
        };
        if let Some(bg) = &config.background {
            surface.set_background(bg)?;
        }
        if let Some(bound) = config.initial_bound() {
            surface.resize(bound)?;
        }
        Ok(surface)
    }

    /// Idempotent SVG element factory.
    ///
    /// Returns the element with `id` if the document has one; otherwise
    /// creates an SVG-namespaced `tag` element with that id under `parent`.
    ///
    /// # Errors
    /// [`DomError::InvalidParent`] when `parent` is not a live node.
    pub fn create_root_child_element(
        document: &mut Document,
        parent: NodeIndex,
        tag: &str,
        id: &str,
    ) -> Result<NodeIndex, DomError> {
        if !document.contains(parent) {
            return Err(DomError::InvalidParent(parent));
        }
        if let Some(existing) = document.get_element_by_id(id) {
            log::trace!("reuse <{tag}> #{id}");
            return Ok(existing);
        }
        let elem = document.create_element(parent, tag, Namespace::Svg)?;
        document.set_id(elem, id)?;
        log::debug!("create <{tag}> #{id} under {parent:?}");
        Ok(elem)
    }

    /// [`create_root_child_element`](Self::create_root_child_element) on this
    /// surface's document.
    pub fn svg_element(
        &mut self,
        parent: NodeIndex,
        tag: &str,
        id: &str,
    ) -> Result<NodeIndex, DomError> {
        Self::create_root_child_element(&mut self.document, parent, tag, id)
    }

    // ─── Lifecycle ───────────────────────────────────────────────────────

    /// Record a new bound, notify players, and size the root element to it.
    pub fn resize(&mut self, bound: Size) -> Result<&mut Self, SurfaceError> {
        self.bound = bound;
        self.players.resize_all(bound);

        let (w, h) = (fmt_num(bound.width), fmt_num(bound.height));
        self.document.set_attributes(
            self.root,
            [
                ("viewBox", format!("0 0 {w} {h}")),
                ("width", w.clone()),
                ("height", h.clone()),
                ("xmlns", SVG_NS.to_string()),
                ("version", "1.1".to_string()),
            ],
        )?;
        log::trace!("surface `{}` resized to {w}x{h}", self.id);
        Ok(self)
    }

    /// Register a player and return its identity.
    pub fn add(&mut self, mut player: Box<dyn Player>) -> AnimateId {
        if self.bound != Size::ZERO {
            player.resize(self.bound);
        }
        let id = self.players.add(player);
        log::debug!("surface `{}` added player {id}", self.id);
        id
    }

    /// Remove every element drawn in the scope of `item`, then unregister it.
    /// Returns how many elements were removed.
    pub fn remove(&mut self, item: AnimateId) -> Result<usize, SurfaceError> {
        let scope = self.container.unwrap_or(self.root);
        let class = item.scope_id();
        let mut removed = 0;
        for idx in self.document.find_by_class(scope, &class) {
            // an earlier match may have taken this one with it
            if self.document.contains(idx) {
                removed += self.document.remove_node(idx)?;
            }
        }
        self.players.remove(item);
        log::debug!("surface `{}` removed {removed} elements of {class}", self.id);
        Ok(removed)
    }

    /// Clear everything drawn and unregister all players. The root `svg`
    /// stays attached so the surface remains drawable.
    pub fn remove_all(&mut self) -> Result<usize, SurfaceError> {
        let mut removed = 0;
        if let Some(container) = self.container {
            for child in self.document.children(container) {
                if child != self.root {
                    removed += self.document.remove_node(child)?;
                }
            }
        }
        removed += self.document.clear_children(self.root)?;
        self.players.clear();
        Ok(removed)
    }

    /// Set the container's background color, keeping its other inline styles.
    pub fn set_background(&mut self, color: &str) -> Result<&mut Self, SurfaceError> {
        let target = self.container.unwrap_or(self.root);
        let existing = self.document.attribute(target, "style").unwrap_or("");
        let merged = merge_declaration(existing, "background-color", color)?;
        self.document.set_attribute(target, "style", merged)?;
        self.background = Some(color.to_string());
        Ok(self)
    }

    /// A drawer bound to this surface.
    pub fn get_form(&mut self) -> SvgForm<'_> {
        SvgForm::new(self)
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    pub fn id(&self) -> &str {
        &self.id
    }

    /// The root `svg` element.
    pub fn root(&self) -> NodeIndex {
        self.root
    }

    pub fn container(&self) -> Option<NodeIndex> {
        self.container
    }

    pub fn bound(&self) -> Size {
        self.bound
    }

    pub fn background(&self) -> Option<&str> {
        self.background.as_deref()
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn into_document(self) -> Document {
        self.document
    }

    /// Serialize the root `svg` element and everything drawn into it.
    pub fn to_svg_string(&self) -> String {
        to_markup(&self.document, self.root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn surface(target: SurfaceTarget) -> SvgSurface {
        SvgSurface::with_id_sequences(
            Document::new(),
            target,
            &SurfaceConfig::default(),
            IdSequence::new(),
            IdSequence::new(),
        )
        .unwrap()
    }

    #[test]
    fn default_target_builds_container_pair() {
        let s = surface(SurfaceTarget::Default);
        let doc = s.document();

        let outer = doc.get_element_by_id("pts_container").unwrap();
        let canvas = doc.get_element_by_id("pts").unwrap();
        assert_eq!(doc.parent(outer), Some(doc.body()));
        assert_eq!(doc.parent(canvas), Some(outer));
        assert_eq!(s.container(), Some(canvas));
        assert_eq!(doc.get_element_by_id("pts_svg"), Some(s.root()));
        assert_eq!(doc.node(s.root()).unwrap().namespace(), Some(Namespace::Svg));
    }

    #[test]
    fn selector_finds_existing_div() {
        let mut doc = Document::new();
        let body = doc.body();
        let div = doc.create_element(body, "div", Namespace::Html).unwrap();
        doc.set_id(div, "stage").unwrap();

        let s = SvgSurface::with_id_sequences(
            doc,
            SurfaceTarget::Selector("#stage".into()),
            &SurfaceConfig::default(),
            IdSequence::new(),
            IdSequence::new(),
        )
        .unwrap();

        assert_eq!(s.id(), "stage");
        assert_eq!(s.container(), Some(div));
        assert_eq!(s.document().parent(s.root()), Some(div));
        assert_eq!(s.document().get_element_by_id("stage_svg"), Some(s.root()));
    }

    #[test]
    fn svg_target_is_used_as_root() {
        let mut doc = Document::new();
        let body = doc.body();
        let holder = doc.create_element(body, "section", Namespace::Html).unwrap();
        let svg = doc.create_element(holder, "svg", Namespace::Svg).unwrap();

        let s = SvgSurface::with_id_sequences(
            doc,
            SurfaceTarget::Element(svg),
            &SurfaceConfig::default(),
            IdSequence::new(),
            IdSequence::new(),
        )
        .unwrap();

        assert_eq!(s.root(), svg);
        assert_eq!(s.container(), Some(holder));
        assert_eq!(s.id(), "pts_existing_space");
    }

    #[test]
    fn document_node_is_not_a_target() {
        let doc = Document::new();
        let root = doc.root;
        let err = SvgSurface::new(doc, SurfaceTarget::Element(root), &SurfaceConfig::default())
            .unwrap_err();
        assert_eq!(err, SurfaceError::NotAnElement(root));
    }

    #[test]
    fn resize_writes_root_attributes_idempotently() {
        let mut s = surface(SurfaceTarget::Default);
        s.resize(Size::new(300.0, 150.0)).unwrap();
        let first = s.document().node(s.root()).unwrap().attributes.clone();
        s.resize(Size::new(300.0, 150.0)).unwrap();
        let second = s.document().node(s.root()).unwrap().attributes.clone();

        assert_eq!(first, second);
        let doc = s.document();
        assert_eq!(doc.attribute(s.root(), "viewBox"), Some("0 0 300 150"));
        assert_eq!(doc.attribute(s.root(), "width"), Some("300"));
        assert_eq!(doc.attribute(s.root(), "height"), Some("150"));
        assert_eq!(doc.attribute(s.root(), "xmlns"), Some(SVG_NS));
        assert_eq!(doc.attribute(s.root(), "version"), Some("1.1"));
    }

    #[test]
    fn element_factory_is_idempotent() {
        let mut s = surface(SurfaceTarget::Default);
        let root = s.root();
        let a = s.svg_element(root, "circle", "factory-1").unwrap();
        let b = s.svg_element(root, "circle", "factory-1").unwrap();
        assert_eq!(a, b);
        assert_eq!(s.document().children(root).len(), 1);
    }

    #[test]
    fn element_factory_rejects_dead_parent() {
        let mut s = surface(SurfaceTarget::Default);
        let root = s.root();
        let g = s.svg_element(root, "g", "doomed-group").unwrap();
        s.document_mut().remove_node(g).unwrap();

        assert_eq!(
            s.svg_element(g, "rect", "orphan"),
            Err(DomError::InvalidParent(g))
        );
    }

    #[test]
    fn background_merges_into_container_style() {
        let mut s = surface(SurfaceTarget::Default);
        let container = s.container().unwrap();
        s.document_mut()
            .set_attribute(container, "style", "border: 1px solid")
            .unwrap();
        s.set_background("#123").unwrap();

        assert_eq!(
            s.document().attribute(container, "style"),
            Some("border: 1px solid;background-color: #123")
        );
        assert_eq!(s.background(), Some("#123"));
    }

    #[test]
    fn config_bound_and_background_apply_on_construction() {
        let config = SurfaceConfig {
            background: Some("#eee".into()),
            width: Some(64.0),
            height: Some(32.0),
            ..SurfaceConfig::default()
        };
        let s = SvgSurface::with_id_sequences(
            Document::new(),
            SurfaceTarget::Default,
            &config,
            IdSequence::new(),
            IdSequence::new(),
        )
        .unwrap();

        assert_eq!(s.bound(), Size::new(64.0, 32.0));
        assert_eq!(s.document().attribute(s.root(), "viewBox"), Some("0 0 64 32"));
        assert_eq!(
            s.document().attribute(s.container().unwrap(), "style"),
            Some("background-color: #eee")
        );
    }
}
