//! Sprites: the nodes of the display list.

use crate::hit_area::HitArea;
use crate::registration::RegistrationPoint;
use crate::stage::StageInner;
use crate::SceneError;
use rustc_hash::FxHashMap;
use stagehand_graphics::{Affine, Point, Rect, Size};
use stagehand_input::{
    InteractiveNode, NodeId, PointerEvent, PointerEventKind, SharedRegistry,
};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_NODE_ID: AtomicU64 = AtomicU64::new(1);

fn next_node_id() -> NodeId {
    NEXT_NODE_ID.fetch_add(1, Ordering::Relaxed)
}

/// Handle for removing a listener again; unique per sprite.
pub type ListenerId = u64;

type Listener = Rc<dyn Fn(&PointerEvent<Sprite>)>;

struct DragState {
    /// Parent-space offset from the mouse to the sprite position at drag
    /// start; zero when the drag is center-locked.
    offset: Point,
}

struct SpriteData {
    id: NodeId,
    name: String,
    parent: Option<Weak<RefCell<SpriteData>>>,
    children: Vec<Sprite>,
    x: f32,
    y: f32,
    rotation: f32,
    scale_x: f32,
    scale_y: f32,
    size: Size,
    registration: RegistrationPoint,
    depth: f32,
    mouse_enabled: bool,
    clickable: bool,
    hit_area: Option<HitArea>,
    listeners: FxHashMap<PointerEventKind, Vec<(ListenerId, Listener)>>,
    next_listener_id: ListenerId,
    attached: bool,
    stage: Option<Weak<StageInner>>,
    registry: Option<SharedRegistry<Sprite>>,
    drag: Option<DragState>,
}

/// A node of the display list. Cheap-clone handle; clones refer to the same
/// sprite.
///
/// `x`/`y` position the registration pivot in the parent's space; rotation
/// (radians, counter-clockwise) and scale also happen around the pivot.
/// Depth orders siblings and hit testing globally: lower depth is in front.
#[derive(Clone)]
pub struct Sprite {
    data: Rc<RefCell<SpriteData>>,
}

impl Sprite {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_size(name, Size::ZERO)
    }

    pub fn with_size(name: impl Into<String>, size: Size) -> Self {
        Self {
            data: Rc::new(RefCell::new(SpriteData {
                id: next_node_id(),
                name: name.into(),
                parent: None,
                children: Vec::new(),
                x: 0.0,
                y: 0.0,
                rotation: 0.0,
                scale_x: 1.0,
                scale_y: 1.0,
                size,
                registration: RegistrationPoint::CENTER,
                depth: 0.0,
                mouse_enabled: false,
                clickable: true,
                hit_area: None,
                listeners: FxHashMap::default(),
                next_listener_id: 0,
                attached: false,
                stage: None,
                registry: None,
                drag: None,
            })),
        }
    }

    pub fn id(&self) -> NodeId {
        self.data.borrow().id
    }

    pub fn name(&self) -> String {
        self.data.borrow().name.clone()
    }

    pub fn set_name(&self, name: impl Into<String>) {
        self.data.borrow_mut().name = name.into();
    }

    // ------------------------------------------------------------------
    // Transform fields
    // ------------------------------------------------------------------

    pub fn x(&self) -> f32 {
        self.data.borrow().x
    }

    pub fn y(&self) -> f32 {
        self.data.borrow().y
    }

    pub fn position(&self) -> Point {
        let data = self.data.borrow();
        Point::new(data.x, data.y)
    }

    pub fn set_position(&self, x: f32, y: f32) {
        let mut data = self.data.borrow_mut();
        data.x = x;
        data.y = y;
    }

    pub fn set_x(&self, x: f32) {
        self.data.borrow_mut().x = x;
    }

    pub fn set_y(&self, y: f32) {
        self.data.borrow_mut().y = y;
    }

    pub fn rotation(&self) -> f32 {
        self.data.borrow().rotation
    }

    pub fn set_rotation(&self, radians: f32) {
        self.data.borrow_mut().rotation = radians;
    }

    pub fn scale_x(&self) -> f32 {
        self.data.borrow().scale_x
    }

    pub fn scale_y(&self) -> f32 {
        self.data.borrow().scale_y
    }

    pub fn set_scale(&self, scale_x: f32, scale_y: f32) {
        let mut data = self.data.borrow_mut();
        data.scale_x = scale_x;
        data.scale_y = scale_y;
    }

    pub fn size(&self) -> Size {
        self.data.borrow().size
    }

    pub fn set_size(&self, size: Size) {
        self.data.borrow_mut().size = size;
    }

    pub fn registration(&self) -> RegistrationPoint {
        self.data.borrow().registration
    }

    pub fn set_registration(&self, registration: RegistrationPoint) {
        self.data.borrow_mut().registration = registration;
    }

    // ------------------------------------------------------------------
    // Depth & interactivity
    // ------------------------------------------------------------------

    pub fn depth(&self) -> f32 {
        self.data.borrow().depth
    }

    /// Change the hit-test priority. Re-sorts the registry when attached, so
    /// the new order takes effect on the next hit test.
    pub fn set_depth(&self, depth: f32) {
        let registry = {
            let mut data = self.data.borrow_mut();
            data.depth = depth;
            if data.attached {
                data.registry.clone()
            } else {
                None
            }
        };
        if let Some(registry) = registry {
            registry.borrow_mut().resort();
        }
    }

    pub fn mouse_enabled(&self) -> bool {
        self.data.borrow().mouse_enabled
    }

    /// Toggle pointer interactivity. While attached this registers or
    /// unregisters live.
    pub fn set_mouse_enabled(&self, enabled: bool) {
        let (changed, registry, id) = {
            let mut data = self.data.borrow_mut();
            let changed = data.mouse_enabled != enabled;
            data.mouse_enabled = enabled;
            let registry = if data.attached {
                data.registry.clone()
            } else {
                None
            };
            (changed, registry, data.id)
        };
        if !changed {
            return;
        }
        if let Some(registry) = registry {
            if enabled {
                registry.borrow_mut().register(self.clone());
            } else {
                registry.borrow_mut().unregister(id);
            }
        }
    }

    pub fn set_clickable(&self, clickable: bool) {
        self.data.borrow_mut().clickable = clickable;
    }

    pub fn custom_hit_area(&self) -> Option<HitArea> {
        self.data.borrow().hit_area.clone()
    }

    pub fn set_hit_area(&self, area: Option<HitArea>) {
        self.data.borrow_mut().hit_area = area;
    }

    // ------------------------------------------------------------------
    // Tree
    // ------------------------------------------------------------------

    pub fn children(&self) -> Vec<Sprite> {
        self.data.borrow().children.clone()
    }

    pub fn num_children(&self) -> usize {
        self.data.borrow().children.len()
    }

    /// Append `child`, re-parenting it away from any previous parent. If
    /// this sprite is attached, the whole new subtree attaches and its
    /// mouse-enabled sprites register.
    pub fn add_child(&self, child: &Sprite) {
        if Rc::ptr_eq(&self.data, &child.data) {
            log::warn!("sprite {}: ignoring add_child of itself", self.id());
            return;
        }
        if let Some(previous) = child.parent() {
            previous.remove_child(child);
        }

        self.data.borrow_mut().children.push(child.clone());
        child.data.borrow_mut().parent = Some(Rc::downgrade(&self.data));

        let (attached, stage, registry) = {
            let data = self.data.borrow();
            (data.attached, data.stage.clone(), data.registry.clone())
        };
        if attached {
            if let (Some(stage), Some(registry)) = (stage, registry) {
                child.attach_subtree(&stage, &registry);
            }
        }
    }

    /// Detach `child`'s subtree and unregister it. Returns false when
    /// `child` is not actually a child of this sprite.
    pub fn remove_child(&self, child: &Sprite) -> bool {
        let found = {
            let mut data = self.data.borrow_mut();
            match data
                .children
                .iter()
                .position(|c| Rc::ptr_eq(&c.data, &child.data))
            {
                Some(index) => {
                    data.children.remove(index);
                    true
                }
                None => false,
            }
        };
        if !found {
            return false;
        }
        child.data.borrow_mut().parent = None;
        if child.attached() {
            child.detach_subtree();
        }
        true
    }

    pub fn parent(&self) -> Option<Sprite> {
        let weak = self.data.borrow().parent.clone()?;
        weak.upgrade().map(|data| Sprite { data })
    }

    pub(crate) fn attach_subtree(
        &self,
        stage: &Weak<StageInner>,
        registry: &SharedRegistry<Sprite>,
    ) {
        let register = {
            let mut data = self.data.borrow_mut();
            data.attached = true;
            data.stage = Some(stage.clone());
            data.registry = Some(registry.clone());
            data.mouse_enabled
        };
        if register {
            registry.borrow_mut().register(self.clone());
        }
        for child in self.children() {
            child.attach_subtree(stage, registry);
        }
    }

    pub(crate) fn detach_subtree(&self) {
        let (registry, id) = {
            let mut data = self.data.borrow_mut();
            data.attached = false;
            data.stage = None;
            data.drag = None;
            (data.registry.take(), data.id)
        };
        if let Some(registry) = registry {
            registry.borrow_mut().unregister(id);
        }
        for child in self.children() {
            child.detach_subtree();
        }
    }

    // ------------------------------------------------------------------
    // Listeners
    // ------------------------------------------------------------------

    /// Attach a listener for `kind`. Listeners run in registration order.
    pub fn on(
        &self,
        kind: PointerEventKind,
        listener: impl Fn(&PointerEvent<Sprite>) + 'static,
    ) -> ListenerId {
        let mut data = self.data.borrow_mut();
        let id = data.next_listener_id;
        data.next_listener_id += 1;
        data.listeners
            .entry(kind)
            .or_default()
            .push((id, Rc::new(listener)));
        id
    }

    /// Remove a listener; false if it was already gone.
    pub fn off(&self, kind: PointerEventKind, id: ListenerId) -> bool {
        let mut data = self.data.borrow_mut();
        let Some(list) = data.listeners.get_mut(&kind) else {
            return false;
        };
        let before = list.len();
        list.retain(|(listener_id, _)| *listener_id != id);
        before != list.len()
    }

    // ------------------------------------------------------------------
    // Geometry
    // ------------------------------------------------------------------

    /// The sprite's natural size rect in local space, hung from the
    /// registration pivot.
    fn geometry_bounds(&self) -> Rect {
        let data = self.data.borrow();
        Rect::new(
            -data.registration.x * data.size.width,
            -data.registration.y * data.size.height,
            data.size.width,
            data.size.height,
        )
    }

    /// Local-space AABB for the coarse hit-test stage: the geometry rect
    /// unioned with the custom hit area's bounds, if any.
    fn local_bounds(&self) -> Rect {
        let geometry = self.geometry_bounds();
        match &self.data.borrow().hit_area {
            Some(area) => geometry.union(&area.bounds()),
            None => geometry,
        }
    }

    fn local_transform(&self) -> Affine {
        let data = self.data.borrow();
        Affine::scale(data.scale_x, data.scale_y)
            .then(&Affine::rotate(data.rotation))
            .then(&Affine::translate(data.x, data.y))
    }

    /// Local-to-stage transform, composed over all ancestors.
    pub fn global_transform(&self) -> Affine {
        let mut transform = self.local_transform();
        let mut cursor = self.parent();
        while let Some(ancestor) = cursor {
            transform = transform.then(&ancestor.local_transform());
            cursor = ancestor.parent();
        }
        transform
    }

    /// Stage-to-local, `None` when the composed transform is singular (a
    /// zero scale axis somewhere up the chain).
    fn try_global_to_local(&self, stage_point: Point) -> Option<Point> {
        self.global_transform()
            .invert()
            .map(|inverse| inverse.apply(stage_point))
    }

    // ------------------------------------------------------------------
    // Dragging
    // ------------------------------------------------------------------

    /// Start following the mouse. With `lock_center` the registration pivot
    /// snaps to the mouse; otherwise the grab offset is preserved. The stage
    /// applies the motion at the end of each frame.
    pub fn start_drag(&self, lock_center: bool) -> Result<(), SceneError> {
        let stage = {
            let data = self.data.borrow();
            data.stage.clone().and_then(|weak| weak.upgrade())
        };
        let (Some(stage), Some(parent)) = (stage, self.parent()) else {
            return Err(SceneError::NotOnStage);
        };

        let offset = if lock_center {
            Point::ZERO
        } else {
            let mouse = stage.mouse_position.get();
            match parent.try_global_to_local(mouse) {
                Some(local_mouse) => local_mouse - self.position(),
                None => Point::ZERO,
            }
        };
        log::debug!("sprite {}: start drag (offset {offset:?})", self.id());
        self.data.borrow_mut().drag = Some(DragState { offset });
        Ok(())
    }

    pub fn stop_drag(&self) {
        if self.data.borrow_mut().drag.take().is_some() {
            log::debug!("sprite {}: stop drag", self.id());
        }
    }

    pub fn dragging(&self) -> bool {
        self.data.borrow().drag.is_some()
    }

    /// Move a dragging sprite to the current mouse position. Stage-internal;
    /// runs after input dispatch each frame.
    pub(crate) fn apply_drag(&self, stage_mouse: Point) {
        let offset = match &self.data.borrow().drag {
            Some(drag) => drag.offset,
            None => return,
        };
        let Some(parent) = self.parent() else {
            return;
        };
        if let Some(local_mouse) = parent.try_global_to_local(stage_mouse) {
            let target = local_mouse - offset;
            self.set_position(target.x, target.y);
        }
    }

    /// Collect every dragging sprite in this subtree.
    pub(crate) fn collect_dragging(&self, out: &mut Vec<Sprite>) {
        if self.dragging() {
            out.push(self.clone());
        }
        for child in self.children() {
            child.collect_dragging(out);
        }
    }
}

impl InteractiveNode for Sprite {
    fn node_id(&self) -> NodeId {
        self.data.borrow().id
    }

    fn depth(&self) -> f32 {
        self.data.borrow().depth
    }

    fn clickable(&self) -> bool {
        self.data.borrow().clickable
    }

    fn hit_bounds(&self, stage_point: Point) -> bool {
        match self.try_global_to_local(stage_point) {
            Some(local) => self.local_bounds().contains(local),
            None => false,
        }
    }

    fn hit_area(&self, stage_point: Point) -> bool {
        let Some(local) = self.try_global_to_local(stage_point) else {
            return false;
        };
        match &self.data.borrow().hit_area {
            Some(area) => area.contains(local),
            None => self.geometry_bounds().contains(local),
        }
    }

    fn global_to_local(&self, stage_point: Point) -> Point {
        // Singular transforms pass the point through unchanged; the hit
        // checks above are the ones that must reject, and they do.
        self.try_global_to_local(stage_point)
            .unwrap_or(stage_point)
    }

    fn parent(&self) -> Option<Self> {
        Sprite::parent(self)
    }

    fn attached(&self) -> bool {
        self.data.borrow().attached
    }

    fn deliver(&self, event: &PointerEvent<Self>) {
        // Snapshot before invoking: listeners may call on()/off() or
        // restructure the scene.
        let snapshot: Vec<Listener> = {
            let data = self.data.borrow();
            match data.listeners.get(&event.kind) {
                Some(list) => list.iter().map(|(_, l)| Rc::clone(l)).collect(),
                None => return,
            }
        };
        for listener in snapshot {
            listener(event);
        }
    }
}

impl std::fmt::Debug for Sprite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let data = self.data.borrow();
        f.debug_struct("Sprite")
            .field("id", &data.id)
            .field("name", &data.name)
            .field("depth", &data.depth)
            .field("attached", &data.attached)
            .finish()
    }
}
