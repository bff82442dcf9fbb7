//! Board bring-up integration tests
//!
//! Drives several Click board drivers end to end over the mock platform,
//! the way firmware would during power-on: construct, init, configure,
//! read. Mock read queues are scripted up front with the exact byte
//! sequence each chip would produce.

use mikroclick::bus::I2cRegisters;
use mikroclick::devices::accel::adxl372::{Adxl372, Adxl372Spi};
use mikroclick::devices::adc::ads1115::{Ads1115, Ads1115Mux, ADS1115_ADDR};
use mikroclick::devices::ble::rn4870::Rn4870;
use mikroclick::devices::digipot::mcp4161::Mcp4161;
use mikroclick::devices::gnss::{ublox, FixQuality, Gnss};
use mikroclick::devices::imu::bmi160::{Bmi160, BMI160_ADDR};
use mikroclick::devices::nfc::pn7150::{Pn7150, RfProtocol, RfTechnology};
use mikroclick::devices::proximity::vcnl4010::Vcnl4010;
use mikroclick::devices::radio::mipot::{protocol, Mipot};
use mikroclick::platform::mock::{MockDelay, MockGpio, MockI2c, MockSpi, MockUart};

fn mock_i2c(read_data: &[u8]) -> MockI2c {
    let i2c = MockI2c::new(Default::default());
    i2c.set_read_data(read_data);
    i2c
}

#[test]
fn imu_bringup_and_first_sample() {
    // Interface latch, chip ID 0xD1, latch again, accel PMU, gyro PMU,
    // then a 12-byte sample with accel Z at +1 g (4096 LSB at +/-8 g)
    let mut sample = vec![0x00, 0xD1, 0x00, 0x10, 0x14];
    sample.extend_from_slice(&[0; 10]);
    sample.extend_from_slice(&4096i16.to_le_bytes());

    let mut imu = Bmi160::new(
        I2cRegisters::new(mock_i2c(&sample), BMI160_ADDR),
        Default::default(),
    );
    let mut delay = MockDelay::new();

    imu.init(&mut delay).unwrap();
    imu.apply_default_config(&mut delay).unwrap();
    assert!(imu.is_healthy());

    let sample = imu.read_sample().unwrap();
    assert!((sample.accel.z - 9.80665).abs() < 1e-3);
    assert!(sample.gyro.x.abs() < 1e-6);

    // Soft reset plus both power-up waits
    assert!(delay.elapsed_us() >= 96_000);
}

#[test]
fn adc_single_shot_reading() {
    // CONFIG at reset, OS set (idle), conversion 16384 counts
    let i2c = mock_i2c(&[0x85, 0x83, 0xC5, 0x83, 0x40, 0x00]);
    let mut adc = Ads1115::new(i2c, ADS1115_ADDR, Default::default());
    let mut delay = MockDelay::new();

    adc.init().unwrap();
    adc.apply_default_config().unwrap();

    // Default gain 2.048 V full scale: 16384 counts -> 1.024 V
    let volts = adc.read_voltage(Ads1115Mux::Single0, &mut delay).unwrap();
    assert!((volts - 1.024).abs() < 1e-4);
}

#[test]
fn proximity_on_demand_measurement() {
    // Product ID 0x21, prox data ready flag, result 0x1234
    let i2c = mock_i2c(&[0x21, 0x20, 0x12, 0x34]);
    let mut sensor = Vcnl4010::new(i2c, Default::default());
    let mut delay = MockDelay::new();

    sensor.init().unwrap();
    sensor.apply_default_config().unwrap();

    let counts = sensor.read_proximity_on_demand(&mut delay).unwrap();
    assert_eq!(counts, 0x1234);
}

#[test]
fn high_g_accel_over_spi() {
    // Three ID bytes, data-ready status, one sample with X at 50 g
    // (0x1F40 left-justified big-endian, 100 mg per LSB)
    let spi = MockSpi::new(Default::default());
    spi.set_read_data(&[0xAD, 0x1D, 0xFA, 0x01, 0x1F, 0x40, 0x00, 0x00, 0x00, 0x00]);

    let bus = Adxl372Spi::new(spi, MockGpio::new_output());
    let mut accel = Adxl372::new(bus, Default::default());
    let mut delay = MockDelay::new();

    accel.init(&mut delay).unwrap();
    accel.apply_default_config().unwrap();

    let g = accel.read_acceleration(&mut delay).unwrap();
    assert!((g.x - 50.0).abs() < 1e-3);
    assert!(g.y.abs() < 1e-6);
}

#[test]
fn digipot_wiper_readback() {
    // STATUS read for init, then a wiper read of full scale (bit 8 set)
    let spi = MockSpi::new(Default::default());
    spi.set_read_data(&[0x02, 0x00, 0x03, 0x00]);

    let mut pot = Mcp4161::new(spi, MockGpio::new_output());
    pot.init().unwrap();
    pot.set_resistance(5_000).unwrap();
    assert_eq!(pot.read_wiper().unwrap(), 256);
}

#[test]
fn lora_module_firmware_query() {
    let uart = MockUart::new(Default::default());
    uart.inject_rx_data(
        &protocol::encode(
            protocol::CMD_GET_FW_VERSION | protocol::RESPONSE_FLAG,
            &[0x04, 0x03, 0x02, 0x01],
        )
        .unwrap(),
    );

    let mut lora = Mipot::new(uart);
    let mut delay = MockDelay::new();
    assert_eq!(lora.firmware_version(&mut delay).unwrap(), 0x01020304);
}

#[test]
fn ble_module_enters_command_mode() {
    let uart = MockUart::new(Default::default());
    uart.inject_rx_data(b"CMD> ");

    let mut ble = Rn4870::new(uart, MockGpio::new_output());
    let mut delay = MockDelay::new();

    ble.enter_command_mode(&mut delay).unwrap();
    assert!(ble.in_command_mode());
}

#[test]
fn nfc_tag_detect_and_read() {
    let i2c = MockI2c::new(Default::default());
    // CORE_RESET_RSP and CORE_INIT_RSP
    i2c.queue_read_data(&[0x40, 0x00, 0x03, 0x00, 0x20, 0x01]);
    i2c.queue_read_data(&[0x40, 0x01, 0x01, 0x00]);
    // RF_DISCOVER_RSP
    i2c.queue_read_data(&[0x41, 0x03, 0x01, 0x00]);
    // RF_INTF_ACTIVATED_NTF: T2T on NFC-A, 4-byte NFCID1
    i2c.queue_read_data(&[0x61, 0x05, 0x10]);
    i2c.queue_read_data(&[
        0x01, 0x01, 0x02, 0x00, 0xFB, 0x01, 0x09, 0x44, 0x00, 0x04, 0xDE, 0xAD, 0xBE, 0xEF,
        0x01, 0x00,
    ]);
    // Tag answer to a T2T READ
    i2c.queue_read_data(&[0x00, 0x00, 0x04, 0x11, 0x22, 0x33, 0x44]);

    let irq = MockGpio::new_input();
    irq.set_input_state(true);

    let mut nfc = Pn7150::new(i2c, irq, MockGpio::new_output());
    let mut delay = MockDelay::new();

    nfc.init(&mut delay).unwrap();
    assert_eq!(nfc.nci_version(), 0x20);

    nfc.start_discovery(&mut delay).unwrap();
    let tag = nfc.wait_for_tag(1_000, &mut delay).unwrap();
    assert_eq!(tag.protocol, RfProtocol::T2t);
    assert_eq!(tag.technology, RfTechnology::NfcA);
    assert_eq!(&tag.nfcid[..], &[0xDE, 0xAD, 0xBE, 0xEF]);

    let mut page = [0u8; 16];
    let len = nfc.data_exchange(&[0x30, 0x00], &mut page, &mut delay).unwrap();
    assert_eq!(&page[..len], &[0x11, 0x22, 0x33, 0x44]);
}

#[test]
fn gnss_configure_and_first_fix() {
    let mut gnss = Gnss::new(MockUart::new(Default::default()));

    // Receiver configuration goes out over the same UART
    ublox::initialize(gnss.uart_mut()).unwrap();

    gnss.uart_mut()
        .inject_rx_data(b"$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47\r\n");
    gnss.uart_mut()
        .inject_rx_data(b"$GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W*6A\r\n");

    let fix = gnss.poll().unwrap().expect("fix after GGA + RMC");
    assert_eq!(fix.quality, FixQuality::Fix3D);
    assert_eq!(fix.satellites, 8);
    assert!((fix.latitude - 48.1173).abs() < 0.001);
    assert!((fix.speed - 11.52).abs() < 0.1);
    assert!(gnss.has_fix());
}
