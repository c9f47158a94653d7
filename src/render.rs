use crate::models::{AxioneSubType, ConfigRequest};

pub(crate) const VRF_WARNING: &str = "\x1b[91m\x1b[1;31mAttention la VRF doit déjà être crée avant de pousser cette config! cf script Add_VRF_BNG\x1b[0m";

const DNS_SERVERS: &str = "1.1.1.1,8.8.8.8";
const GATEWAY: &str = "100.127.126.1";

/// Renders a validated request. Values are interpolated verbatim.
pub(crate) fn render(request: &ConfigRequest) -> String {
    match request {
        ConfigRequest::Sbc {
            numbers,
            regex,
            centile_lrt,
        } => render_sbc(numbers, regex, *centile_lrt),
        ConfigRequest::Ftto {
            wl_id,
            site_name,
            ip,
            vlan_id,
        } => render_ftto(wl_id, site_name, ip, vlan_id),
        ConfigRequest::Orange {
            ip,
            pppoe_username,
            password,
            site_name,
        } => format!(
            "/user-manager/user add attributes=Framed-IP-Address:{ip} comment=\"{site_name}\" group=tims.oc name={pppoe_username} password={password}"
        ),
        ConfigRequest::Axione {
            sub_type,
            ip,
            wl_id,
            password,
            site_name,
        } => render_axione(*sub_type, ip, wl_id, password, site_name),
        ConfigRequest::Ift {
            wl_id,
            site_name,
            ip,
            svlan,
            trigramme,
        } => render_ift(wl_id, site_name, ip, svlan, trigramme.as_deref()),
    }
}

fn render_sbc(numbers: &[String], regex: &str, centile_lrt: bool) -> String {
    let prefix = if centile_lrt { "33" } else { "0" };
    numbers
        .iter()
        .map(|number| {
            let national = number.trim_start_matches('0');
            format!("<route>\n<user type=\"string\">{prefix}{national}</user>\n{regex}\n</route>")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_ftto(wl_id: &str, site_name: &str, ip: &str, vlan_id: &str) -> String {
    let vlan_if = format!("VL{vlan_id}_{wl_id}-ICO-IPVPN");
    let vrrp_if = format!("VRRP_VL{vlan_id}_{wl_id}");
    let mut lines = Vec::new();

    lines.push("# Configuration MIKROTIK (TIMPRRT25MKTWAN1):".to_string());
    lines.push(String::new());
    lines.push(format!(
        "/interface vlan add interface=Bond-SW-PROD name={vlan_if} vlan-id={vlan_id} comment=\"{site_name}\""
    ));
    lines.push(format!(
        "/interface vrrp add authentication=simple name={vrrp_if} interface={vlan_if} version=2 comment=\"{site_name}\" password=PRvl{vlan_id}"
    ));
    lines.push(format!(
        "/ip address add address=100.127.126.2/29 interface={vlan_if}"
    ));
    lines.push(format!(
        "/ip address add address={GATEWAY} interface={vrrp_if} comment=\"{site_name}\" network={ip}"
    ));
    lines.push(format!(
        "/ip dhcp-server add address-pool={ip} disabled=no interface={vlan_if} name={vlan_if} conflict-detection=no comment=\"{site_name}\""
    ));
    lines.push(format!(
        "/ip dhcp-server network add address={ip}/32 dns-server={DNS_SERVERS} gateway={GATEWAY}"
    ));
    lines.push(String::new());

    // The backup router differs in VRRP priority, address and option order.
    lines.push("# Configuration MIKROTIK (TIMPRRT26MKTWAN2):".to_string());
    lines.push(String::new());
    lines.push(format!(
        "/interface vlan add interface=Bond-SW-PROD name={vlan_if} vlan-id={vlan_id} comment=\"{site_name}\""
    ));
    lines.push(format!(
        "/interface vrrp add authentication=simple name={vrrp_if} interface={vlan_if} version=2 priority=50 comment=\"{site_name}\" password=PRvl{vlan_id}"
    ));
    lines.push(format!(
        "/ip address add address=100.127.126.3/29 interface={vlan_if}"
    ));
    lines.push(format!(
        "/ip address add address={GATEWAY} interface={vrrp_if} comment=\"{site_name}\" network={ip}"
    ));
    lines.push(format!(
        "/ip dhcp-server add address-pool={ip} disabled=no interface={vlan_if} name={vlan_if} comment=\"{site_name}\" conflict-detection=no"
    ));
    lines.push(format!(
        "/ip dhcp-server network add address={ip}/32 dns-server={DNS_SERVERS} gateway={GATEWAY}"
    ));
    lines.push(String::new());

    lines.push("# Configuration CISCO NEXUS PROD:".to_string());
    lines.push(String::new());
    lines.push("configure terminal".to_string());
    lines.push(format!("vlan {vlan_id}"));
    lines.push(format!("name {wl_id}-ICO-IPVPN"));
    lines.push("exit".to_string());
    lines.push("exit".to_string());
    lines.push("wr".to_string());

    lines.join("\n")
}

fn render_axione(
    sub_type: AxioneSubType,
    ip: &str,
    wl_id: &str,
    password: &str,
    site_name: &str,
) -> String {
    let group = match sub_type {
        AxioneSubType::Pro => "tims.axi.pro",
        AxioneSubType::Opera => "tims.axi.ope",
    };
    let tunnel = format!("/user-manager/user add group={group} name={wl_id}@tims-ftth-ax");
    let cpe = format!(
        "/user-manager/user add attributes=Mikrotik-Group:tims.ax,Framed-IP-Address:{ip} comment=\"{site_name}\" name={wl_id}"
    );
    let ipvpn = format!(
        "/user-manager/user add attributes=Framed-IP-Address:{ip} comment=\"{site_name}\" group=tims.ax name={wl_id}@ipvpn.tims.axi password={password}"
    );
    format!(
        "# Configuration Tunnel\n{tunnel}\n\n# Configuration CPE\n{cpe}\n\n# Configuration IPVPN\n{ipvpn}"
    )
}

fn render_ift(
    wl_id: &str,
    site_name: &str,
    ip: &str,
    svlan: &str,
    trigramme: Option<&str>,
) -> String {
    let outer = format!("SVL{svlan}_IFT-{wl_id}");
    let inner = format!("SVL{svlan}_CVL300_IFT_{wl_id}");
    let mut lines = vec![
        "# Configuration MIKROTIK VIRTUEL (TIMPRRT25MKTWAN1):".to_string(),
        String::new(),
    ];
    if trigramme.is_some() {
        lines.push(VRF_WARNING.to_string());
        lines.push(String::new());
    }
    lines.push(format!(
        "/interface vlan add interface=sfp-sfpplus2-ift name={outer} vlan-id={svlan} comment=\"{site_name}\""
    ));
    lines.push(format!(
        "/interface vlan add interface={outer} name={inner} vlan-id=300 comment=\"{site_name}\""
    ));
    lines.push(format!(
        "/ip address add address={GATEWAY} interface={inner} network={ip}"
    ));
    lines.push(format!(
        "/ip dhcp-server add address-pool={ip} disabled=no interface={inner} name=DHCP_SVL{svlan}_IFT_{wl_id} conflict-detection=no comment=\"{site_name}\""
    ));
    lines.push(format!(
        "/ip dhcp-server network add address={ip}/32 dns-server={DNS_SERVERS} gateway={GATEWAY}"
    ));
    if let Some(trigramme) = trigramme {
        lines.push(format!(
            "/interface list member add interface={inner} list=IFL-{trigramme}"
        ));
    }
    lines.join("\n")
}
