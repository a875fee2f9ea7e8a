//! Library containers: packages, devices and device sets.
//!
//! A board that only carries signals needs an empty `<libraries>` element,
//! but a library file holds packages built from pads and other primitives.
//! Schematic symbols are out of scope; the `<symbols>` element is always
//! written empty.

use crate::eagle::{
    element::{Element, ToElement},
    primitive::Primitive,
};

/// A footprint made of pads, wires and texts.
///
/// # Example
///
/// ```
/// # use icrom_core::{eagle::{Package, Pad, ToElement}, geometry::Point};
/// let mut package = Package::new("PAD1");
/// package.push(Pad::new("1", Point::new(0.0, 0.0), 1.0668));
///
/// let element = package.to_element();
/// assert_eq!(element.attr("name"), Some("PAD1"));
/// assert_eq!(element.children().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Package {
    name: String,
    primitives: Vec<Primitive>,
}

impl Package {
    /// Creates an empty package.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            primitives: Vec::new(),
        }
    }

    /// Appends a primitive.
    pub fn push(&mut self, primitive: impl Into<Primitive>) {
        self.primitives.push(primitive.into());
    }

    /// Returns the package name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the primitives in insertion order.
    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }
}

impl ToElement for Package {
    fn to_element(&self) -> Element {
        let mut element = Element::new("package").with_attr("name", self.name.clone());
        element.extend_children(self.primitives.iter().map(Primitive::to_element));
        element
    }
}

/// A device technology. Eagle requires at least one per device; the empty
/// name is the default technology.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Technology {
    name: String,
}

impl Technology {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl ToElement for Technology {
    fn to_element(&self) -> Element {
        Element::new("technology").with_attr("name", self.name.clone())
    }
}

/// A package variant of a device set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Device {
    name: String,
    package: String,
    technologies: Vec<Technology>,
}

impl Device {
    /// Creates a device bound to `package` with the default technology.
    pub fn new(name: impl Into<String>, package: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            package: package.into(),
            technologies: vec![Technology::default()],
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn package(&self) -> &str {
        &self.package
    }
}

impl ToElement for Device {
    fn to_element(&self) -> Element {
        let mut technologies = Element::new("technologies");
        technologies.extend_children(self.technologies.iter().map(Technology::to_element));
        Element::new("device")
            .with_attr("name", self.name.clone())
            .with_attr("package", self.package.clone())
            .with_child(Element::new("connects"))
            .with_child(technologies)
    }
}

/// A named set of devices sharing the same gates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deviceset {
    name: String,
    devices: Vec<Device>,
}

impl Deviceset {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            devices: Vec::new(),
        }
    }

    /// Adds a device and returns the set.
    pub fn with_device(mut self, device: Device) -> Self {
        self.devices.push(device);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn devices(&self) -> &[Device] {
        &self.devices
    }
}

impl ToElement for Deviceset {
    fn to_element(&self) -> Element {
        let mut devices = Element::new("devices");
        devices.extend_children(self.devices.iter().map(Device::to_element));
        Element::new("deviceset")
            .with_attr("name", self.name.clone())
            .with_child(Element::new("gates"))
            .with_child(devices)
    }
}

/// A component library.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Library {
    name: Option<String>,
    packages: Vec<Package>,
    devicesets: Vec<Deviceset>,
}

impl Library {
    /// Creates an anonymous library, as stored in a library file.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a named library, as embedded in a board.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn add_package(&mut self, package: Package) {
        self.packages.push(package);
    }

    pub fn add_deviceset(&mut self, deviceset: Deviceset) {
        self.devicesets.push(deviceset);
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn packages(&self) -> &[Package] {
        &self.packages
    }

    pub fn devicesets(&self) -> &[Deviceset] {
        &self.devicesets
    }
}

impl ToElement for Library {
    fn to_element(&self) -> Element {
        let mut element = Element::new("library");
        if let Some(name) = &self.name {
            element.push_attr("name", name.clone());
        }

        let mut packages = Element::new("packages");
        packages.extend_children(self.packages.iter().map(Package::to_element));
        let mut devicesets = Element::new("devicesets");
        devicesets.extend_children(self.devicesets.iter().map(Deviceset::to_element));

        element
            .with_child(packages)
            .with_child(Element::new("symbols"))
            .with_child(devicesets)
    }
}
