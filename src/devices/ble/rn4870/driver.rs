//! RN4870 Driver Implementation

use core::fmt::Write as _;

use heapless::String;

use crate::devices::ble::BleError;
use crate::platform::{DelayInterface, GpioInterface, UartInterface};

/// Bounded attempts while collecting a module response
const MAX_RESPONSE_ATTEMPTS: u32 = 200;

/// Delay between response-collection attempts (ms)
const RESPONSE_POLL_INTERVAL_MS: u32 = 5;

/// RST pulse width (ms)
const RESET_PULSE_MS: u32 = 1;

/// Module boot time after reset or reboot (ms)
const BOOT_DELAY_MS: u32 = 100;

/// Response accumulation capacity
const RESPONSE_CAPACITY: usize = 128;

/// Command line capacity (opcode + argument + CR)
const COMMAND_CAPACITY: usize = 40;

/// Classified module response
///
/// The module interleaves echo, status lines and the prompt, so
/// classification is substring-based over everything collected so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Reply {
    /// Command accepted (`AOK`)
    Aok,
    /// Command rejected (`Err`)
    Err,
    /// Command prompt (`CMD> `)
    Prompt,
    /// Reboot banner (`%REBOOT%`)
    Reboot,
    /// Command-mode exit acknowledgment (`END`)
    End,
    /// Nothing conclusive collected yet
    Pending,
}

impl Reply {
    /// Classify everything received so far
    pub fn classify(response: &str) -> Reply {
        if response.contains("AOK") {
            Reply::Aok
        } else if response.contains("Err") {
            Reply::Err
        } else if response.contains("%REBOOT%") {
            Reply::Reboot
        } else if response.contains("END") {
            Reply::End
        } else if response.contains("CMD> ") {
            Reply::Prompt
        } else {
            Reply::Pending
        }
    }
}

/// RN4870 BLE module driver (UART + RST GPIO)
///
/// The module boots into transparent UART mode; configuration commands
/// require entering command mode first. Peer data flows through
/// [`write`](Self::write)/[`read`](Self::read) while in transparent mode.
pub struct Rn4870<U, RST> {
    /// UART link to the module
    uart: U,

    /// Active-low reset line
    rst: RST,

    /// Whether the module is in command mode
    command_mode: bool,
}

impl<U, RST> Rn4870<U, RST>
where
    U: UartInterface,
    RST: GpioInterface,
{
    /// Create a new module driver
    pub fn new(uart: U, rst: RST) -> Self {
        Self {
            uart,
            rst,
            command_mode: false,
        }
    }

    /// Pulse RST low and wait out the module boot time
    pub fn hardware_reset<D: DelayInterface>(&mut self, delay: &mut D) -> Result<(), BleError> {
        self.rst.set_low()?;
        delay.delay_ms(RESET_PULSE_MS);
        self.rst.set_high()?;
        delay.delay_ms(BOOT_DELAY_MS);
        self.command_mode = false;
        crate::log_info!("RN4870 hardware reset");
        Ok(())
    }

    /// Whether the module is currently in command mode
    pub fn in_command_mode(&self) -> bool {
        self.command_mode
    }

    /// Switch from transparent UART to command mode
    ///
    /// The escape sequence is `$$$` with no terminator; the module
    /// acknowledges with its prompt.
    pub fn enter_command_mode<D: DelayInterface>(&mut self, delay: &mut D) -> Result<(), BleError> {
        self.uart.write(b"$$$")?;
        self.uart.flush()?;
        match self.collect_reply(delay, true)? {
            Reply::Prompt => {
                self.command_mode = true;
                Ok(())
            }
            _ => Err(BleError::CommandFailed),
        }
    }

    /// Return to transparent UART mode
    pub fn exit_command_mode<D: DelayInterface>(&mut self, delay: &mut D) -> Result<(), BleError> {
        if !self.command_mode {
            return Err(BleError::NotInCommandMode);
        }
        self.uart.write(b"---\r\n")?;
        self.uart.flush()?;
        match self.collect_reply(delay, false)? {
            Reply::End => {
                self.command_mode = false;
                Ok(())
            }
            Reply::Err => Err(BleError::CommandFailed),
            _ => Err(BleError::CommandFailed),
        }
    }

    /// Set the advertised device name (`SN`)
    pub fn set_device_name<D: DelayInterface>(
        &mut self,
        name: &str,
        delay: &mut D,
    ) -> Result<(), BleError> {
        let mut cmd: String<COMMAND_CAPACITY> = String::new();
        write!(cmd, "SN,{}", name).map_err(|_| BleError::InvalidParameter)?;
        self.command(&cmd, delay)
    }

    /// Set the serialized device name (`S-`), which appends the last two
    /// MAC bytes to make the name unique
    pub fn set_serialized_name<D: DelayInterface>(
        &mut self,
        name: &str,
        delay: &mut D,
    ) -> Result<(), BleError> {
        let mut cmd: String<COMMAND_CAPACITY> = String::new();
        write!(cmd, "S-,{}", name).map_err(|_| BleError::InvalidParameter)?;
        self.command(&cmd, delay)
    }

    /// Set the default services bitmap (`SS`)
    ///
    /// Bit 7 enables device information, bit 6 transparent UART.
    pub fn set_default_services<D: DelayInterface>(
        &mut self,
        services: u8,
        delay: &mut D,
    ) -> Result<(), BleError> {
        let mut cmd: String<COMMAND_CAPACITY> = String::new();
        write!(cmd, "SS,{:02X}", services).map_err(|_| BleError::InvalidParameter)?;
        self.command(&cmd, delay)
    }

    /// Reboot the module so configuration changes take effect (`R,1`)
    ///
    /// Waits for the `%REBOOT%` banner, then the boot settle time. The
    /// module comes back in transparent mode.
    pub fn reboot<D: DelayInterface>(&mut self, delay: &mut D) -> Result<(), BleError> {
        if !self.command_mode {
            return Err(BleError::NotInCommandMode);
        }
        self.uart.write(b"R,1\r")?;
        self.uart.flush()?;
        match self.collect_reply(delay, false)? {
            Reply::Reboot => {
                self.command_mode = false;
                delay.delay_ms(BOOT_DELAY_MS);
                crate::log_info!("RN4870 rebooted");
                Ok(())
            }
            _ => Err(BleError::CommandFailed),
        }
    }

    /// Start advertising (`A`)
    pub fn start_advertising<D: DelayInterface>(&mut self, delay: &mut D) -> Result<(), BleError> {
        self.command("A", delay)
    }

    /// Stop advertising (`Y`)
    pub fn stop_advertising<D: DelayInterface>(&mut self, delay: &mut D) -> Result<(), BleError> {
        self.command("Y", delay)
    }

    /// Transparent-UART write to the connected peer
    pub fn write(&mut self, data: &[u8]) -> Result<usize, BleError> {
        Ok(self.uart.write(data)?)
    }

    /// Transparent-UART read from the connected peer (non-blocking)
    pub fn read(&mut self, buffer: &mut [u8]) -> Result<usize, BleError> {
        Ok(self.uart.read(buffer)?)
    }

    /// Whether peer data is waiting
    pub fn available(&self) -> bool {
        self.uart.available()
    }

    // ========================================================================
    // Command plumbing
    // ========================================================================

    /// Send a CR-terminated command and require `AOK`
    fn command<D: DelayInterface>(&mut self, cmd: &str, delay: &mut D) -> Result<(), BleError> {
        if !self.command_mode {
            return Err(BleError::NotInCommandMode);
        }
        let mut line: String<COMMAND_CAPACITY> = String::new();
        write!(line, "{}\r", cmd).map_err(|_| BleError::InvalidParameter)?;
        self.uart.write(line.as_bytes())?;
        self.uart.flush()?;
        match self.collect_reply(delay, false)? {
            Reply::Aok => Ok(()),
            _ => Err(BleError::CommandFailed),
        }
    }

    /// Accumulate module output until it classifies, with bounded polling
    ///
    /// `accept_prompt` lets the bare prompt terminate collection, used
    /// when entering command mode; otherwise the prompt alone keeps the
    /// wait going until a status line arrives.
    fn collect_reply<D: DelayInterface>(
        &mut self,
        delay: &mut D,
        accept_prompt: bool,
    ) -> Result<Reply, BleError> {
        let mut response: String<RESPONSE_CAPACITY> = String::new();
        for _ in 0..MAX_RESPONSE_ATTEMPTS {
            let mut buf = [0u8; 32];
            let count = self.uart.read(&mut buf)?;
            if count > 0 {
                for &byte in &buf[..count] {
                    if response.push(byte as char).is_err() {
                        return Err(BleError::ResponseOverflow);
                    }
                }
                match Reply::classify(&response) {
                    Reply::Pending => {}
                    Reply::Prompt if !accept_prompt => {}
                    reply => return Ok(reply),
                }
                continue;
            }
            delay.delay_ms(RESPONSE_POLL_INTERVAL_MS);
        }
        crate::log_warn!("RN4870 response timeout");
        Err(BleError::Timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::mock::{MockDelay, MockGpio, MockUart};

    fn driver() -> Rn4870<MockUart, MockGpio> {
        Rn4870::new(MockUart::new(Default::default()), MockGpio::new_output())
    }

    #[test]
    fn test_reply_classification() {
        assert_eq!(Reply::classify("CMD> "), Reply::Prompt);
        assert_eq!(Reply::classify("SN,x\r\nAOK\r\nCMD> "), Reply::Aok);
        assert_eq!(Reply::classify("Err\r\nCMD> "), Reply::Err);
        assert_eq!(Reply::classify("R,1\r\n%REBOOT%"), Reply::Reboot);
        assert_eq!(Reply::classify("partial ech"), Reply::Pending);
    }

    #[test]
    fn test_enter_command_mode() {
        let mut ble = driver();
        let mut delay = MockDelay::new();
        ble.uart.inject_rx_data(b"CMD> ");

        ble.enter_command_mode(&mut delay).unwrap();
        assert!(ble.in_command_mode());
        // Escape sequence carries no terminator
        assert_eq!(ble.uart.tx_buffer(), b"$$$");
    }

    #[test]
    fn test_set_device_name() {
        let mut ble = driver();
        let mut delay = MockDelay::new();
        ble.command_mode = true;
        ble.uart.inject_rx_data(b"AOK\r\nCMD> ");

        ble.set_device_name("rover-link", &mut delay).unwrap();
        assert_eq!(ble.uart.tx_buffer(), b"SN,rover-link\r");
    }

    #[test]
    fn test_set_default_services_hex_argument() {
        let mut ble = driver();
        let mut delay = MockDelay::new();
        ble.command_mode = true;
        ble.uart.inject_rx_data(b"AOK\r\nCMD> ");

        ble.set_default_services(0xC0, &mut delay).unwrap();
        assert_eq!(ble.uart.tx_buffer(), b"SS,C0\r");
    }

    #[test]
    fn test_command_rejected() {
        let mut ble = driver();
        let mut delay = MockDelay::new();
        ble.command_mode = true;
        ble.uart.inject_rx_data(b"Err\r\nCMD> ");

        assert_eq!(
            ble.set_device_name("x", &mut delay),
            Err(BleError::CommandFailed)
        );
    }

    #[test]
    fn test_command_outside_command_mode() {
        let mut ble = driver();
        let mut delay = MockDelay::new();
        assert_eq!(
            ble.start_advertising(&mut delay),
            Err(BleError::NotInCommandMode)
        );
    }

    #[test]
    fn test_reboot_waits_for_banner() {
        let mut ble = driver();
        let mut delay = MockDelay::new();
        ble.command_mode = true;
        ble.uart.inject_rx_data(b"R,1\r\nRebooting\r\n%REBOOT%");

        ble.reboot(&mut delay).unwrap();
        assert!(!ble.in_command_mode());
        assert_eq!(ble.uart.tx_buffer(), b"R,1\r");
        // Boot settle after the banner
        assert_eq!(delay.elapsed_us(), 100_000);
    }

    #[test]
    fn test_exit_command_mode() {
        let mut ble = driver();
        let mut delay = MockDelay::new();
        ble.command_mode = true;
        ble.uart.inject_rx_data(b"END\r\n");

        ble.exit_command_mode(&mut delay).unwrap();
        assert!(!ble.in_command_mode());
        assert_eq!(ble.uart.tx_buffer(), b"---\r\n");
    }

    #[test]
    fn test_hardware_reset_pulse() {
        let mut ble = driver();
        let mut delay = MockDelay::new();
        ble.command_mode = true;

        ble.hardware_reset(&mut delay).unwrap();
        assert!(ble.rst.read());
        assert!(!ble.in_command_mode());
        // 1 ms pulse + 100 ms boot
        assert_eq!(delay.elapsed_us(), 101_000);
    }

    #[test]
    fn test_response_timeout() {
        let mut ble = driver();
        let mut delay = MockDelay::new();
        ble.command_mode = true;

        assert_eq!(ble.start_advertising(&mut delay), Err(BleError::Timeout));
        assert_eq!(
            delay.elapsed_us(),
            u64::from(MAX_RESPONSE_ATTEMPTS) * 5_000
        );
    }

    #[test]
    fn test_transparent_passthrough() {
        let mut ble = driver();
        ble.uart.inject_rx_data(b"pong");

        assert_eq!(ble.write(b"ping").unwrap(), 4);
        assert_eq!(ble.uart.tx_buffer(), b"ping");

        assert!(ble.available());
        let mut buf = [0u8; 8];
        let count = ble.read(&mut buf).unwrap();
        assert_eq!(&buf[..count], b"pong");
    }
}
