//! The face: a node's attachment point for sending and receiving packets.

use crate::{FaceConfig, FaceFlags, PacketHandlers, Transport};
use bytes::Bytes;
use nnn_wire::{Aen, Do, En, Inf, NullP, PacketType, Ren, So, WireError};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use tracing::{trace, warn};

/// Identifier of a face, unique within its node
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FaceId(u32);

impl FaceId {
    /// Create an identifier from its raw value
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Raw identifier value
    pub const fn raw(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for FaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "face-{}", self.0)
    }
}

/// Hands out face identifiers in creation order, one allocator per node
#[derive(Debug, Default)]
pub struct FaceIdAllocator {
    next: u32,
}

impl FaceIdAllocator {
    /// Create an allocator starting at id 0
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next identifier
    pub fn allocate(&mut self) -> FaceId {
        let id = FaceId(self.next);
        self.next += 1;
        id
    }
}

/// A send/receive attachment point bound to one transport.
///
/// Faces start down and pass no traffic in either direction until
/// [`set_up`](Face::set_up) brings them up; packets offered to a down face
/// are dropped without error. Inbound buffers are decoded by their sniffed
/// type tag, except tag 5 which REN and INF share: those arrive through
/// [`receive_ren`](Face::receive_ren) and [`receive_inf`](Face::receive_inf),
/// where the caller supplies the kind the tag cannot.
pub struct Face<T> {
    id: FaceId,
    transport: T,
    config: FaceConfig,
    up: bool,
    handlers: Option<Box<dyn PacketHandlers>>,
}

impl<T: fmt::Debug> fmt::Debug for Face<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Face")
            .field("id", &self.id)
            .field("transport", &self.transport)
            .field("config", &self.config)
            .field("up", &self.up)
            .field("handlers", &self.handlers.is_some())
            .finish()
    }
}

impl<T: Transport> Face<T> {
    /// Create a face over `transport`. The face starts down.
    pub fn new(id: FaceId, transport: T, config: FaceConfig) -> Self {
        Self {
            id,
            transport,
            config,
            up: false,
            handlers: None,
        }
    }

    /// Face identifier
    pub fn id(&self) -> FaceId {
        self.id
    }

    /// Routing metric
    pub fn metric(&self) -> u16 {
        self.config.metric
    }

    /// Change the routing metric
    pub fn set_metric(&mut self, metric: u16) {
        self.config.metric = metric;
    }

    /// Whether the face connects to a local application
    pub fn is_application(&self) -> bool {
        self.config.flags.contains(FaceFlags::APPLICATION)
    }

    /// Whether the face passes traffic
    pub fn is_up(&self) -> bool {
        self.up
    }

    /// Bring the face up or down
    pub fn set_up(&mut self, up: bool) {
        trace!(face = %self.id, up, "face state change");
        self.up = up;
    }

    /// Install the upper-layer handlers, replacing any previous set
    pub fn register_handlers(&mut self, handlers: Box<dyn PacketHandlers>) {
        self.handlers = Some(handlers);
    }

    /// Remove the upper-layer handlers; received packets are then dropped
    /// after decoding
    pub fn unregister_handlers(&mut self) {
        self.handlers = None;
    }

    /// Send a NULL packet. Returns whether the transport accepted it.
    pub fn send_nullp(&mut self, packet: &mut NullP) -> bool {
        if !self.up {
            trace!(face = %self.id, "face is down, dropping outbound NULL");
            return false;
        }
        self.send_encoded(packet.to_wire(), "NULL")
    }

    /// Send a solicitation. Returns whether the transport accepted it.
    pub fn send_so(&mut self, packet: &mut So) -> bool {
        if !self.up {
            trace!(face = %self.id, "face is down, dropping outbound SO");
            return false;
        }
        self.send_encoded(packet.to_wire(), "SO")
    }

    /// Send a data object. Returns whether the transport accepted it.
    pub fn send_do(&mut self, packet: &mut Do) -> bool {
        if !self.up {
            trace!(face = %self.id, "face is down, dropping outbound DO");
            return false;
        }
        self.send_encoded(packet.to_wire(), "DO")
    }

    /// Send an enrollment. Returns whether the transport accepted it.
    pub fn send_en(&mut self, packet: &mut En) -> bool {
        if !self.up {
            trace!(face = %self.id, "face is down, dropping outbound EN");
            return false;
        }
        self.send_encoded(packet.to_wire(), "EN")
    }

    /// Send an enrollment acknowledgement. Returns whether the transport
    /// accepted it.
    pub fn send_aen(&mut self, packet: &mut Aen) -> bool {
        if !self.up {
            trace!(face = %self.id, "face is down, dropping outbound AEN");
            return false;
        }
        self.send_encoded(packet.to_wire(), "AEN")
    }

    /// Send a renewal. Returns whether the transport accepted it.
    pub fn send_ren(&mut self, packet: &mut Ren) -> bool {
        if !self.up {
            trace!(face = %self.id, "face is down, dropping outbound REN");
            return false;
        }
        self.send_encoded(packet.to_wire(), "REN")
    }

    /// Send an inform. Returns whether the transport accepted it.
    pub fn send_inf(&mut self, packet: &mut Inf) -> bool {
        if !self.up {
            trace!(face = %self.id, "face is down, dropping outbound INF");
            return false;
        }
        self.send_encoded(packet.to_wire(), "INF")
    }

    fn send_encoded(&mut self, wire: Result<Bytes, WireError>, kind: &str) -> bool {
        match wire {
            Ok(wire) => self.transport.send(wire),
            Err(err) => {
                warn!(face = %self.id, %err, kind, "failed to encode outbound packet");
                false
            }
        }
    }

    /// Receive an inbound buffer, decode it by its sniffed type tag and hand
    /// it to the handlers. Returns whether a packet was delivered.
    ///
    /// A buffer carrying tag 5 is dropped with a warning: the tag cannot say
    /// whether it is a REN or an INF, so such buffers must come in through
    /// [`receive_ren`](Face::receive_ren) or [`receive_inf`](Face::receive_inf).
    /// Unknown tags and malformed packets are logged and dropped.
    pub fn receive(&mut self, wire: Bytes) -> bool {
        if !self.up {
            trace!(face = %self.id, "face is down, dropping inbound buffer");
            return false;
        }
        let kind = match PacketType::sniff(&wire) {
            Ok(kind) => kind,
            Err(err) => {
                warn!(face = %self.id, %err, "dropping unrecognized inbound buffer");
                return false;
            }
        };
        let decoded = match kind {
            PacketType::Null => NullP::from_wire(wire).map(|p| {
                if let Some(h) = self.handlers.as_mut() {
                    h.on_nullp(self.id, &p);
                }
            }),
            PacketType::So => So::from_wire(wire).map(|p| {
                if let Some(h) = self.handlers.as_mut() {
                    h.on_so(self.id, &p);
                }
            }),
            PacketType::Do => Do::from_wire(wire).map(|p| {
                if let Some(h) = self.handlers.as_mut() {
                    h.on_do(self.id, &p);
                }
            }),
            PacketType::En => En::from_wire(wire).map(|p| {
                if let Some(h) = self.handlers.as_mut() {
                    h.on_en(self.id, &p);
                }
            }),
            PacketType::Aen => Aen::from_wire(wire).map(|p| {
                if let Some(h) = self.handlers.as_mut() {
                    h.on_aen(self.id, &p);
                }
            }),
            PacketType::RenInf => {
                warn!(
                    face = %self.id,
                    "dropping tag-5 buffer: REN and INF are indistinguishable here"
                );
                return false;
            }
        };
        match decoded {
            Ok(()) => true,
            Err(err) => {
                warn!(face = %self.id, %err, "dropping malformed inbound packet");
                false
            }
        }
    }

    /// Receive a buffer known from context to carry a renewal. Returns
    /// whether a packet was delivered.
    pub fn receive_ren(&mut self, wire: Bytes) -> bool {
        if !self.up {
            trace!(face = %self.id, "face is down, dropping inbound buffer");
            return false;
        }
        match Ren::from_wire(wire) {
            Ok(p) => {
                if let Some(h) = self.handlers.as_mut() {
                    h.on_ren(self.id, &p);
                }
                true
            }
            Err(err) => {
                warn!(face = %self.id, %err, "dropping malformed REN packet");
                false
            }
        }
    }

    /// Receive a buffer known from context to carry an inform. Returns
    /// whether a packet was delivered.
    pub fn receive_inf(&mut self, wire: Bytes) -> bool {
        if !self.up {
            trace!(face = %self.id, "face is down, dropping inbound buffer");
            return false;
        }
        match Inf::from_wire(wire) {
            Ok(p) => {
                if let Some(h) = self.handlers.as_mut() {
                    h.on_inf(self.id, &p);
                }
                true
            }
            Err(err) => {
                warn!(face = %self.id, %err, "dropping malformed INF packet");
                false
            }
        }
    }
}

impl<T> PartialEq for Face<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T> PartialOrd for Face<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.id.cmp(&other.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RecordingTransport;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Seen {
        dos: Vec<(FaceId, String, Bytes)>,
        rens: Vec<u16>,
        infs: Vec<u16>,
    }

    struct TestHandlers(Rc<RefCell<Seen>>);

    impl PacketHandlers for TestHandlers {
        fn on_do(&mut self, face: FaceId, packet: &Do) {
            self.0.borrow_mut().dos.push((
                face,
                packet.name().unwrap().to_dot_hex(),
                packet.payload().clone(),
            ));
        }

        fn on_ren(&mut self, _face: FaceId, packet: &Ren) {
            self.0.borrow_mut().rens.push(packet.lease());
        }

        fn on_inf(&mut self, _face: FaceId, packet: &Inf) {
            self.0.borrow_mut().infs.push(packet.lease());
        }
    }

    fn up_face() -> Face<RecordingTransport> {
        let mut face = Face::new(
            FaceId::new(0),
            RecordingTransport::new(),
            FaceConfig::default(),
        );
        face.set_up(true);
        face
    }

    #[test]
    fn test_starts_down_and_drops() {
        let mut face = Face::new(
            FaceId::new(7),
            RecordingTransport::new(),
            FaceConfig::default(),
        );
        assert!(!face.is_up());

        let mut p = NullP::new();
        assert!(!face.send_nullp(&mut p));
        let wire = p.to_wire().unwrap();
        assert!(!face.receive(wire));
    }

    #[test]
    fn test_send_hands_wire_to_transport() {
        let mut face = up_face();
        let mut p = NullP::with_payload(Bytes::from_static(b"x"));
        assert!(face.send_nullp(&mut p));
        assert_eq!(face.transport.frames(), &[p.to_wire().unwrap()]);
    }

    #[test]
    fn test_send_unaddressed_packet_fails() {
        let mut face = up_face();
        let mut p = Do::new();
        assert!(!face.send_do(&mut p));
        assert!(face.transport.frames().is_empty());
    }

    #[test]
    fn test_receive_dispatches_do() {
        let seen = Rc::new(RefCell::new(Seen::default()));
        let mut face = up_face();
        face.register_handlers(Box::new(TestHandlers(seen.clone())));

        let mut p = Do::with_payload("1.a.3".parse().unwrap(), Bytes::from_static(b"hello"));
        p.set_ttl(5);
        assert!(face.receive(p.to_wire().unwrap()));

        let seen = seen.borrow();
        assert_eq!(
            seen.dos,
            vec![(
                FaceId::new(0),
                "1.A.3".to_string(),
                Bytes::from_static(b"hello")
            )]
        );
    }

    #[test]
    fn test_receive_drops_tag_five() {
        let seen = Rc::new(RefCell::new(Seen::default()));
        let mut face = up_face();
        face.register_handlers(Box::new(TestHandlers(seen.clone())));

        let mut ren = Ren::with_name("1.2".parse().unwrap());
        ren.set_lease(30);
        let wire = ren.to_wire().unwrap();

        assert!(!face.receive(wire.clone()));
        assert!(face.receive_ren(wire));

        let seen = seen.borrow();
        assert!(seen.rens == vec![30]);
        assert!(seen.infs.is_empty());
    }

    #[test]
    fn test_receive_inf_with_context() {
        let seen = Rc::new(RefCell::new(Seen::default()));
        let mut face = up_face();
        face.register_handlers(Box::new(TestHandlers(seen.clone())));

        let mut inf = Inf::with_names("1.2".parse().unwrap(), "3.4".parse().unwrap());
        inf.set_lease(90);
        assert!(face.receive_inf(inf.to_wire().unwrap()));
        assert_eq!(seen.borrow().infs, vec![90]);
    }

    #[test]
    fn test_receive_drops_unknown_tag() {
        let mut face = up_face();
        assert!(!face.receive(Bytes::from_static(&[0, 0, 0, 6, 0, 4, 0, 0])));
    }

    #[test]
    fn test_allocator_is_monotonic() {
        let mut alloc = FaceIdAllocator::new();
        assert_eq!(alloc.allocate(), FaceId::new(0));
        assert_eq!(alloc.allocate(), FaceId::new(1));
        assert_eq!(alloc.allocate(), FaceId::new(2));
    }

    #[test]
    fn test_faces_compare_by_id() {
        let a = Face::new(
            FaceId::new(1),
            RecordingTransport::new(),
            FaceConfig::default(),
        );
        let b = Face::new(
            FaceId::new(2),
            RecordingTransport::new(),
            FaceConfig::default(),
        );
        assert!(a < b);
        assert_ne!(a, b);
    }
}
