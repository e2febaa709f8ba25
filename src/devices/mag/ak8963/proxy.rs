//! MPU-9250 bridge proxy
//!
//! Reaches the AK8963 through the MPU-9250's auxiliary I2C master. Slave 0 is
//! programmed with the target address, register and length; the bridge runs
//! the transaction on its next sample cycle and drops the result into the
//! EXT_SENS_DATA window.
//!
//! Reads come in two flavours:
//!
//! - blocking ([`BridgeProxy::read`]): program slave 0, wait a fixed delay,
//!   fetch. Used for bring-up and detection.
//! - queued ([`BridgeProxy::start_read`] / [`BridgeProxy::complete_read`]):
//!   program slave 0 now, fetch once the conversion budget has elapsed. At
//!   most one queued read is in flight.

use super::config::ProxyTiming;
use super::registers::{
    I2C_MST_CTRL_400KHZ, I2C_SLV_EN, I2C_SLV_LEN_MAX, I2C_SLV_READ_FLAG, INT_PIN_CFG_BYPASS_EN,
    INT_PIN_CFG_INT_ANYRD_2CLEAR, MPU_EXT_SENS_DATA_00, MPU_I2C_MST_CTRL, MPU_I2C_SLV0_ADDR,
    MPU_I2C_SLV0_CTRL, MPU_I2C_SLV0_DO, MPU_I2C_SLV0_REG, MPU_INT_PIN_CFG, MPU_USER_CTRL,
    USER_CTRL_I2C_IF_DIS, USER_CTRL_I2C_MST_EN,
};
use crate::devices::traits::MagError;
use crate::platform::traits::{RegisterInterface, TimerInterface};

/// Bookkeeping for the one queued read the bridge can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QueuedRead {
    outstanding: bool,
    len: u8,
    started_at_us: u64,
}

impl QueuedRead {
    /// A read has been started and not completed yet
    pub fn is_outstanding(&self) -> bool {
        self.outstanding
    }

    /// Length of the last started read
    pub fn read_len(&self) -> u8 {
        self.len
    }

    /// Clock value when the last read was started
    pub fn started_at_us(&self) -> u64 {
        self.started_at_us
    }
}

/// Register access to the AK8963 through the bridge's slave 0 channel
pub struct BridgeProxy<B, T> {
    bus: B,
    timer: T,
    timing: ProxyTiming,
    queued: QueuedRead,
}

impl<B: RegisterInterface, T: TimerInterface> BridgeProxy<B, T> {
    /// Create a proxy over the bridge's register interface
    pub fn new(bus: B, timer: T, timing: ProxyTiming) -> Self {
        Self {
            bus,
            timer,
            timing,
            queued: QueuedRead::default(),
        }
    }

    /// Queued-read state
    pub fn queued(&self) -> &QueuedRead {
        &self.queued
    }

    /// Timing in use
    pub fn timing(&self) -> &ProxyTiming {
        &self.timing
    }

    /// Replace the timing. A read already queued keeps its start time but is
    /// measured against the new budget.
    pub fn set_timing(&mut self, timing: ProxyTiming) {
        self.timing = timing;
    }

    /// Borrow the bridge register interface
    pub fn bus(&mut self) -> &mut B {
        &mut self.bus
    }

    /// Borrow the timer
    pub fn timer(&mut self) -> &mut T {
        &mut self.timer
    }

    /// Release the bus and timer
    pub fn release(self) -> (B, T) {
        (self.bus, self.timer)
    }

    /// Configure the bridge's I2C master so slave 0 can reach the AK8963
    pub fn enable_master(&mut self) -> Result<(), MagError> {
        self.write_settled(
            MPU_INT_PIN_CFG,
            INT_PIN_CFG_INT_ANYRD_2CLEAR | INT_PIN_CFG_BYPASS_EN,
        )?;
        self.write_settled(MPU_I2C_MST_CTRL, I2C_MST_CTRL_400KHZ)?;
        self.write_settled(MPU_USER_CTRL, USER_CTRL_I2C_MST_EN | USER_CTRL_I2C_IF_DIS)
    }

    /// Write one register of the device at `addr`
    pub fn write(&mut self, addr: u8, reg: u8, value: u8) -> Result<(), MagError> {
        self.write_settled(MPU_I2C_SLV0_ADDR, addr)?;
        self.write_settled(MPU_I2C_SLV0_REG, reg)?;
        self.write_settled(MPU_I2C_SLV0_DO, value)?;
        self.write_settled(MPU_I2C_SLV0_CTRL, I2C_SLV_EN | 0x01)
    }

    /// Blocking read of `buf.len()` registers starting at `reg`
    ///
    /// Must not be mixed with an outstanding queued read: both share the
    /// slave 0 channel and the result window.
    ///
    /// # Errors
    ///
    /// `MagError::InvalidLength` for bursts over 15 bytes, before anything is
    /// written to the bridge.
    pub fn read(&mut self, addr: u8, reg: u8, buf: &mut [u8]) -> Result<(), MagError> {
        if buf.len() > I2C_SLV_LEN_MAX as usize {
            return Err(MagError::InvalidLength);
        }
        self.setup_read(addr, reg, buf.len() as u8)?;
        self.timer.delay_ms(self.timing.sync_read_delay_ms)?;
        self.fetch(buf)
    }

    /// Queue a read of `len` registers starting at `reg`
    ///
    /// Returns `false` if a read is already outstanding, if `len` exceeds 15
    /// bytes, or if the bridge did not accept the setup writes. In all cases
    /// nothing new is queued.
    pub fn start_read(&mut self, addr: u8, reg: u8, len: u8) -> bool {
        if self.queued.outstanding || len > I2C_SLV_LEN_MAX {
            return false;
        }

        if let Err(err) = self.setup_read(addr, reg, len) {
            crate::log_debug!("bridge read setup failed: {:?}", err);
            return false;
        }

        self.queued = QueuedRead {
            outstanding: true,
            len,
            started_at_us: self.timer.now_us(),
        };
        true
    }

    /// Microseconds until the queued read is valid, 0 if none is outstanding
    pub fn remaining_time_us(&self) -> u32 {
        if !self.queued.outstanding {
            return 0;
        }

        let elapsed = self.timer.elapsed_since(self.queued.started_at_us);
        let budget = self.timing.conversion_budget_us as u64;
        budget.saturating_sub(elapsed) as u32
    }

    /// Finish the queued read, waiting out whatever budget remains
    ///
    /// Fills at most the queued length into `buf`. The outstanding flag is
    /// cleared before the fetch, so a failed fetch does not wedge the proxy.
    pub fn complete_read(&mut self, buf: &mut [u8]) -> Result<(), MagError> {
        let remaining = self.remaining_time_us();
        if remaining > 0 {
            self.timer.delay_us(remaining)?;
        }

        self.queued.outstanding = false;
        let len = core::cmp::min(self.queued.len as usize, buf.len());
        self.fetch(&mut buf[..len])
    }

    fn setup_read(&mut self, addr: u8, reg: u8, len: u8) -> Result<(), MagError> {
        self.write_settled(MPU_I2C_SLV0_ADDR, addr | I2C_SLV_READ_FLAG)?;
        self.write_settled(MPU_I2C_SLV0_REG, reg)?;
        self.write_settled(MPU_I2C_SLV0_CTRL, I2C_SLV_EN | len)
    }

    fn write_settled(&mut self, reg: u8, value: u8) -> Result<(), MagError> {
        let result = self.bus.write_register(reg, value);
        self.timer.delay_us(self.timing.settle_delay_us)?;
        result.map_err(MagError::from)
    }

    /// Fetch from the result window with interrupts masked, so the bridge's
    /// next sample cycle cannot be observed half-way through the burst.
    fn fetch(&mut self, buf: &mut [u8]) -> Result<(), MagError> {
        let bus = &mut self.bus;
        critical_section::with(|_| bus.read_registers(MPU_EXT_SENS_DATA_00, buf))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::devices::mag::ak8963::registers::{AK8963_ADDR, AK8963_HXL, AK8963_ST1};
    use crate::platform::mock::{register::RegisterAccess, MockRegisters, MockTimer};

    fn proxy() -> (BridgeProxy<MockRegisters, MockTimer>, MockTimer) {
        let timer = MockTimer::new();
        let proxy = BridgeProxy::new(MockRegisters::new(), timer.clone(), ProxyTiming::default());
        (proxy, timer)
    }

    #[test]
    fn write_programs_slave0() {
        let (mut proxy, timer) = proxy();
        proxy.write(AK8963_ADDR, 0x0A, 0x01).unwrap();

        assert_eq!(
            proxy.bus().writes(),
            vec![(0x25, 0x0C), (0x26, 0x0A), (0x63, 0x01), (0x27, 0x81)]
        );
        assert_eq!(timer.delays(), vec![10, 10, 10, 10]);
    }

    #[test]
    fn blocking_read_waits_then_fetches() {
        let (mut proxy, timer) = proxy();
        proxy.bus().queue_read(&[0x80, 0x81, 0x82]);

        let mut trim = [0u8; 3];
        proxy.read(AK8963_ADDR, 0x10, &mut trim).unwrap();

        assert_eq!(trim, [0x80, 0x81, 0x82]);
        assert_eq!(
            proxy.bus().log(),
            &[
                RegisterAccess::Write { reg: 0x25, value: 0x8C },
                RegisterAccess::Write { reg: 0x26, value: 0x10 },
                RegisterAccess::Write { reg: 0x27, value: 0x83 },
                RegisterAccess::Read { reg: 0x49, len: 3 },
            ]
        );
        assert_eq!(timer.delays(), vec![10, 10, 10, 4_000]);
    }

    #[test]
    fn blocking_read_rejects_oversized_burst() {
        let (mut proxy, timer) = proxy();

        let mut buf = [0u8; 16];
        assert_eq!(
            proxy.read(AK8963_ADDR, 0x00, &mut buf),
            Err(MagError::InvalidLength)
        );
        assert!(proxy.bus().log().is_empty());
        assert!(timer.delays().is_empty());

        // 15 bytes is the largest burst slave 0 can carry
        let mut buf = [0u8; 15];
        proxy.read(AK8963_ADDR, 0x00, &mut buf).unwrap();
        assert_eq!(proxy.bus().writes()[2], (0x27, 0x8F));
    }

    #[test]
    fn start_read_rejects_oversized_burst() {
        let (mut proxy, _timer) = proxy();

        assert!(!proxy.start_read(AK8963_ADDR, AK8963_HXL, 16));
        assert!(!proxy.queued().is_outstanding());
        assert!(proxy.bus().log().is_empty());
    }

    #[test]
    fn set_timing_applies_to_queued_read() {
        let (mut proxy, _timer) = proxy();
        assert!(proxy.start_read(AK8963_ADDR, AK8963_ST1, 1));

        proxy.set_timing(ProxyTiming {
            conversion_budget_us: 2_000,
            ..ProxyTiming::default()
        });
        assert_eq!(proxy.remaining_time_us(), 2_000);
    }

    #[test]
    fn enable_master_sequence() {
        let (mut proxy, _timer) = proxy();
        proxy.enable_master().unwrap();

        assert_eq!(proxy.bus().writes(), vec![(0x37, 0x12), (0x24, 0x0D), (0x6A, 0x30)]);
    }

    #[test]
    fn start_read_rejected_while_outstanding() {
        let (mut proxy, timer) = proxy();
        timer.set(1_000);

        assert!(proxy.start_read(AK8963_ADDR, AK8963_ST1, 1));
        let before = *proxy.queued();
        let writes_before = proxy.bus().writes().len();

        timer.advance(500);
        assert!(!proxy.start_read(AK8963_ADDR, AK8963_HXL, 7));

        assert_eq!(*proxy.queued(), before);
        assert_eq!(proxy.bus().writes().len(), writes_before);
        assert_eq!(proxy.queued().read_len(), 1);
    }

    #[test]
    fn start_read_records_start_after_setup() {
        let (mut proxy, timer) = proxy();
        timer.set(2_000);

        assert!(proxy.start_read(AK8963_ADDR, AK8963_HXL, 7));
        // three settle delays precede the timestamp
        assert_eq!(proxy.queued().started_at_us(), 2_030);
        assert_eq!(proxy.bus().writes(), vec![(0x25, 0x8C), (0x26, 0x03), (0x27, 0x87)]);
    }

    #[test]
    fn failed_setup_queues_nothing() {
        let (mut proxy, _timer) = proxy();
        proxy.bus().fail_writes(1);

        assert!(!proxy.start_read(AK8963_ADDR, AK8963_ST1, 1));
        assert!(!proxy.queued().is_outstanding());
        assert_eq!(proxy.remaining_time_us(), 0);
    }

    #[test]
    fn remaining_time_counts_down_to_zero() {
        let (mut proxy, timer) = proxy();
        assert_eq!(proxy.remaining_time_us(), 0);

        assert!(proxy.start_read(AK8963_ADDR, AK8963_ST1, 1));
        let mut last = proxy.remaining_time_us();
        assert_eq!(last, 8_000);

        for _ in 0..9 {
            timer.advance(1_000);
            let now = proxy.remaining_time_us();
            assert!(now <= last);
            last = now;
        }
        assert_eq!(last, 0);
    }

    #[test]
    fn remaining_time_hits_zero_exactly_at_budget() {
        let (mut proxy, timer) = proxy();
        assert!(proxy.start_read(AK8963_ADDR, AK8963_ST1, 1));

        timer.advance(7_999);
        assert_eq!(proxy.remaining_time_us(), 1);
        timer.advance(1);
        assert_eq!(proxy.remaining_time_us(), 0);
    }

    #[test]
    fn remaining_time_tolerates_clock_behind_start() {
        let (mut proxy, timer) = proxy();
        timer.set(10_000);
        assert!(proxy.start_read(AK8963_ADDR, AK8963_ST1, 1));

        timer.set(0);
        assert_eq!(proxy.remaining_time_us(), 8_000);
    }

    #[test]
    fn complete_read_waits_out_remaining_budget() {
        let (mut proxy, timer) = proxy();
        assert!(proxy.start_read(AK8963_ADDR, AK8963_ST1, 1));
        timer.advance(5_000);
        timer.clear_delays();
        proxy.bus().queue_read(&[0x01]);

        let mut status = [0u8; 1];
        proxy.complete_read(&mut status).unwrap();

        assert_eq!(status, [0x01]);
        assert_eq!(timer.delays(), vec![3_000]);
        assert!(!proxy.queued().is_outstanding());
        assert_eq!(proxy.remaining_time_us(), 0);
    }

    #[test]
    fn complete_read_without_wait_after_budget() {
        let (mut proxy, timer) = proxy();
        assert!(proxy.start_read(AK8963_ADDR, AK8963_HXL, 7));
        timer.advance(9_000);
        timer.clear_delays();

        let mut frame = [0xFFu8; 7];
        proxy.complete_read(&mut frame).unwrap();

        assert!(timer.delays().is_empty());
        assert_eq!(proxy.bus().reads(), vec![(0x49, 7)]);
    }

    #[test]
    fn failed_fetch_still_clears_outstanding() {
        let (mut proxy, timer) = proxy();
        assert!(proxy.start_read(AK8963_ADDR, AK8963_ST1, 1));
        timer.advance(8_000);
        proxy.bus().fail_reads(1);

        let mut status = [0u8; 1];
        assert_eq!(proxy.complete_read(&mut status), Err(MagError::Bus));
        assert!(!proxy.queued().is_outstanding());
        assert!(proxy.start_read(AK8963_ADDR, AK8963_ST1, 1));
    }
}
