//! Rendered `cross-domain-policy` document.
//!
//! Layout is fixed:
//!
//! ```text
//! <?xml version="1.0"?>
//! <!DOCTYPE cross-domain-policy SYSTEM "http://www.adobe.com/xml/dtds/cross-domain-policy.dtd">
//! <cross-domain-policy>
//!   <site-control permitted-cross-domain-policies="..."/>
//!   <allow-access-from domain="..." to-ports="..." secure="false"/>
//! </cross-domain-policy>
//! ```
//!
//! Flash clients parse the document structurally, so whitespace between
//! elements is not part of the contract.

use std::fmt::{self, Write as _};

use bytes::{BufMut, Bytes, BytesMut};

use super::site_control::SiteControl;

pub const XML_DECL: &str = r#"<?xml version="1.0"?>"#;
pub const DOCTYPE: &str = r#"<!DOCTYPE cross-domain-policy SYSTEM "http://www.adobe.com/xml/dtds/cross-domain-policy.dtd">"#;

/// Socket policy responses are NUL-terminated on the wire.
pub const WIRE_TERMINATOR: u8 = 0;

/// One `allow-access-from` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessGrant {
    pub domain: String,
    pub ports: String,
}

/// A validated policy, ready to serialize.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyDocument {
    pub site_control: SiteControl,
    pub grants: Vec<AccessGrant>,
}

impl PolicyDocument {
    pub fn to_xml(&self) -> String {
        self.to_string()
    }

    /// XML followed by the NUL terminator.
    pub fn to_wire(&self) -> Bytes {
        let xml = self.to_xml();
        let mut buf = BytesMut::with_capacity(xml.len() + 1);
        buf.put_slice(xml.as_bytes());
        buf.put_u8(WIRE_TERMINATOR);
        buf.freeze()
    }
}

impl fmt::Display for PolicyDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{XML_DECL}")?;
        writeln!(f, "{DOCTYPE}")?;
        writeln!(f, "<cross-domain-policy>")?;
        writeln!(
            f,
            r#"  <site-control permitted-cross-domain-policies="{}"/>"#,
            Escaped(self.site_control.as_str())
        )?;
        for grant in &self.grants {
            writeln!(
                f,
                r#"  <allow-access-from domain="{}" to-ports="{}" secure="false"/>"#,
                Escaped(&grant.domain),
                Escaped(&grant.ports)
            )?;
        }
        write!(f, "</cross-domain-policy>")
    }
}

/// Attribute-value escaping.
struct Escaped<'a>(&'a str);

impl fmt::Display for Escaped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.0.chars() {
            match c {
                '&' => f.write_str("&amp;")?,
                '<' => f.write_str("&lt;")?,
                '>' => f.write_str("&gt;")?,
                '"' => f.write_str("&quot;")?,
                '\'' => f.write_str("&apos;")?,
                c => f.write_char(c)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn doc() -> PolicyDocument {
        PolicyDocument {
            site_control: SiteControl::MasterOnly,
            grants: vec![
                AccessGrant { domain: "example.com".into(), ports: "80,443".into() },
                AccessGrant { domain: "*.example.com".into(), ports: "*".into() },
            ],
        }
    }

    #[test]
    fn renders_fixed_schema() {
        let xml = doc().to_xml();
        let expected = "<?xml version=\"1.0\"?>\n\
            <!DOCTYPE cross-domain-policy SYSTEM \"http://www.adobe.com/xml/dtds/cross-domain-policy.dtd\">\n\
            <cross-domain-policy>\n  \
            <site-control permitted-cross-domain-policies=\"master-only\"/>\n  \
            <allow-access-from domain=\"example.com\" to-ports=\"80,443\" secure=\"false\"/>\n  \
            <allow-access-from domain=\"*.example.com\" to-ports=\"*\" secure=\"false\"/>\n\
            </cross-domain-policy>";
        assert_eq!(xml, expected);
    }

    #[test]
    fn no_grants_still_closes_root() {
        let d = PolicyDocument { site_control: SiteControl::None, grants: vec![] };
        let xml = d.to_xml();
        assert!(xml.contains(r#"permitted-cross-domain-policies="none""#));
        assert!(!xml.contains("allow-access-from"));
        assert!(xml.ends_with("</cross-domain-policy>"));
    }

    #[test]
    fn wire_form_is_nul_terminated_utf8() {
        let wire = doc().to_wire();
        assert_eq!(wire.last(), Some(&WIRE_TERMINATOR));
        let body = std::str::from_utf8(&wire[..wire.len() - 1]).unwrap();
        assert_eq!(body, doc().to_xml());
    }

    #[test]
    fn attribute_values_are_escaped() {
        let d = PolicyDocument {
            site_control: SiteControl::All,
            grants: vec![AccessGrant { domain: r#"a"&<b>'"#.into(), ports: "*".into() }],
        };
        assert!(d.to_xml().contains(r#"domain="a&quot;&amp;&lt;b&gt;&apos;""#));
    }
}
