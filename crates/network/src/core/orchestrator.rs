use std::collections::VecDeque;

use tapenet_common::constants::{DEFAULT_IDLE_SENTINEL, DEFAULT_NAT_ADDRESS};
use tapenet_vm::core::{
    memory::Memory,
    vm::{Status, VM},
};
use tracing::{debug, info, warn};

use crate::error::Error;

use super::{
    packet::{Packet, PacketFramer},
    rendezvous::{Rendezvous, Transition},
};

/// Outcome of a network run that reached the repeated-payload condition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TerminationResult {
    /// The payload `y` that was re-injected twice in a row.
    pub y: i64,
    /// `y` of the first packet that ever reached the rendezvous point.
    pub first_y: Option<i64>,
    /// Number of full pool passes.
    pub ticks: u64,
    /// Number of passes after which the network was idle.
    pub idle_cycles: u64,
}

#[derive(Clone, Debug)]
struct Node {
    id: usize,
    vm: VM,
    inbox: VecDeque<Packet>,
    framer: PacketFramer,
    excluded: bool,
}

/// Runs `vm` until it waits on an input instruction with nothing queued, or reaches a terminal
/// status.
fn drive(vm: &mut VM) -> Result<Status, tapenet_vm::Error> {
    loop {
        let status = vm.run_until_input()?;
        if status.is_terminal() {
            return Ok(status);
        }
        if !vm.has_pending_input() {
            return Ok(Status::NeedsInput);
        }
        vm.step()?;
    }
}

/// A fixed-size pool of VM instances exchanging packets, scheduled cooperatively from a single
/// loop.
///
/// Each pass ("tick") runs every live instance once, in address order. Packets an instance
/// produces are routed only after that instance finished its turn. Instances that fault or halt
/// are excluded from later passes; the run fails instead if instance 0, the target of
/// re-injected packets, is lost.
#[derive(Clone, Debug)]
pub struct Network {
    nodes: Vec<Node>,
    rendezvous: Rendezvous,
    rendezvous_address: i64,
    idle_sentinel: i64,
    booted: bool,
    ticks: u64,
    idle_cycles: u64,
    result: Option<TerminationResult>,
}

impl Network {
    /// Creates a pool of `pool_size` instances, each running its own copy of `memory`.
    pub fn new(memory: &Memory, pool_size: usize) -> Result<Network, Error> {
        if pool_size == 0 {
            return Err(Error::InvalidPoolSize(pool_size));
        }

        let nodes = (0..pool_size)
            .map(|id| Node {
                id,
                vm: VM::new(memory.clone()),
                inbox: VecDeque::new(),
                framer: PacketFramer::new(DEFAULT_IDLE_SENTINEL),
                excluded: false,
            })
            .collect();

        Ok(Network {
            nodes,
            rendezvous: Rendezvous::new(),
            rendezvous_address: DEFAULT_NAT_ADDRESS,
            idle_sentinel: DEFAULT_IDLE_SENTINEL,
            booted: false,
            ticks: 0,
            idle_cycles: 0,
            result: None,
        })
    }

    /// Sets the destination address that reaches the rendezvous point.
    pub fn with_rendezvous_address(mut self, address: i64) -> Network {
        self.rendezvous_address = address;
        self
    }

    /// Sets the value delivered to instances with an empty inbox.
    pub fn with_idle_sentinel(mut self, sentinel: i64) -> Network {
        self.idle_sentinel = sentinel;
        for node in &mut self.nodes {
            node.framer = PacketFramer::new(sentinel);
        }
        self
    }

    /// Number of instances in the pool, excluded ones included.
    pub fn pool_size(&self) -> usize {
        self.nodes.len()
    }

    /// Addresses of the instances that were excluded after faulting or halting.
    pub fn excluded(&self) -> Vec<usize> {
        self.nodes.iter().filter(|node| node.excluded).map(|node| node.id).collect()
    }

    /// The rendezvous point.
    pub fn rendezvous(&self) -> &Rendezvous {
        &self.rendezvous
    }

    /// Number of completed pool passes.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Number of idle detections so far.
    pub fn idle_cycles(&self) -> u64 {
        self.idle_cycles
    }

    /// Feeds every instance its own address and runs it up to its first input request.
    /// Called by the first [`Network::tick`] if not called explicitly.
    pub fn boot(&mut self) -> Result<(), Error> {
        if self.booted {
            return Ok(());
        }
        self.booted = true;

        for id in 0..self.nodes.len() {
            let node = &mut self.nodes[id];
            node.vm.push_input(id as i64);
            debug!(id, "booting instance");

            self.advance_node(id)?;
        }

        Ok(())
    }

    /// Runs one full pool pass, then lets the rendezvous point react to the resulting state.
    /// Returns the result once the network terminated.
    pub fn tick(&mut self) -> Result<Option<TerminationResult>, Error> {
        if self.result.is_some() {
            return Ok(self.result);
        }
        self.boot()?;

        for id in 0..self.nodes.len() {
            let sentinel = self.idle_sentinel;
            let node = &mut self.nodes[id];
            if node.excluded {
                continue;
            }

            if node.inbox.is_empty() {
                node.vm.push_input(sentinel);
            } else {
                for packet in node.inbox.drain(..) {
                    node.vm.extend_input(packet.payload());
                }
            }

            self.advance_node(id)?;
        }
        self.ticks += 1;

        // a single-pass snapshot: nothing was left undelivered after everyone had a turn
        let idle = self.nodes.iter().all(|node| node.inbox.is_empty());
        if idle {
            self.idle_cycles += 1;
            debug!(tick = self.ticks, idle_cycles = self.idle_cycles, "network is idle");
        }

        match self.rendezvous.advance(idle) {
            Transition::Continue => Ok(None),
            Transition::Reinject(packet) => {
                debug!(tick = self.ticks, "re-injecting {} into instance 0", packet);
                if let Some(carrier) = self.nodes.first_mut() {
                    carrier.inbox.push_back(packet);
                }
                Ok(None)
            }
            Transition::Terminate(y) => {
                let result = TerminationResult {
                    y,
                    first_y: self.rendezvous.first_y(),
                    ticks: self.ticks,
                    idle_cycles: self.idle_cycles,
                };
                info!(
                    y,
                    ticks = self.ticks,
                    idle_cycles = self.idle_cycles,
                    "network terminated after re-injecting the same payload twice"
                );

                self.result = Some(result);
                Ok(self.result)
            }
        }
    }

    /// Ticks until the network terminates.
    ///
    /// An idle network only terminates through the rendezvous point. If no packet ever reaches
    /// it, this never returns; drive [`Network::tick`] directly to bound the run.
    pub fn run(&mut self) -> Result<TerminationResult, Error> {
        loop {
            if let Some(result) = self.tick()? {
                return Ok(result);
            }
        }
    }

    /// Runs instance `id` on whatever input it has queued, then routes the packets it produced.
    fn advance_node(&mut self, id: usize) -> Result<(), Error> {
        let (outcome, packets) = {
            let node = &mut self.nodes[id];
            let outcome = drive(&mut node.vm);
            let output = node.vm.drain_output();
            (outcome, node.framer.push(&output))
        };

        for packet in packets {
            self.route(id, packet);
        }

        match outcome {
            Ok(status) if status.is_terminal() => self.exclude(id, status.to_string()),
            Ok(_) => Ok(()),
            Err(e) => self.exclude(id, e.to_string()),
        }
    }

    fn route(&mut self, from: usize, packet: Packet) {
        if packet.destination == self.rendezvous_address {
            debug!(from, "{} reached the rendezvous point", packet);
            self.rendezvous.receive(packet);
            return;
        }

        match usize::try_from(packet.destination).ok().and_then(|to| self.nodes.get_mut(to)) {
            Some(node) if !node.excluded => node.inbox.push_back(packet),
            Some(node) => warn!(from, "dropping {}: instance {} is excluded", packet, node.id),
            None => warn!(from, "dropping {}: no such instance", packet),
        }
    }

    fn exclude(&mut self, id: usize, reason: String) -> Result<(), Error> {
        let live = self.nodes.iter().filter(|node| !node.excluded).count();
        if live <= 1 {
            return Err(Error::Stalled);
        }
        if id == 0 {
            return Err(Error::CarrierFaulted { id, reason });
        }

        warn!(id, reason = %reason, "excluding instance");
        let node = &mut self.nodes[id];
        node.excluded = true;
        if !node.inbox.is_empty() {
            warn!(id, "dropping {} undelivered packets", node.inbox.len());
            node.inbox.clear();
        }

        Ok(())
    }
}
